//! # Core Models Module
//!
//! Data structures describing a parsed input deck. Everything here is plain data:
//! parsing lives in [`crate::core::io`], cross-directive checks in
//! [`crate::engine::validate`].
//!
//! ## Key Components
//!
//! - [`config`] - [`config::SimulationConfig`], the whole deck
//! - [`units`] - Unit systems and the engine defaults that depend on them
//! - [`styles`] - Atom styles, interaction styles, k-space and neighbor settings
//! - [`coeff`] - Coefficient lines (`pair_coeff`, `bond_coeff`, ...)
//! - [`fix`] - Fix directives and the driver socket coupling
//! - [`params`] - Classified argument tokens and type selectors

pub mod coeff;
pub mod config;
pub mod fix;
pub mod params;
pub mod styles;
pub mod units;
