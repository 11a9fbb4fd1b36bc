//! # Workflows Module
//!
//! High-level entry points for users of lmpdeck. Each workflow ties the
//! script I/O of [`crate::core`] to the options and checks of
//! [`crate::engine`] and returns fully typed results.
//!
//! ## Architecture
//!
//! - **Loading** ([`load`]) - Read one deck and run the consistency checks
//! - **Batch Checking** ([`check`]) - Validate many decks in parallel with progress events
//! - **Formatting** ([`format`]) - Canonical re-serialization of a loaded deck
//! - **Rendering** ([`render`]) - Conversion between decks and TOML descriptions

pub mod check;
pub mod format;
pub mod load;
pub mod render;
