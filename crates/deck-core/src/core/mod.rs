//! # Core Module
//!
//! The stateless foundation of lmpdeck: the typed model of an input deck, the
//! static tables describing which directives and styles the engine accepts,
//! and the script reader and writer.
//!
//! ## Architecture
//!
//! - **Deck Representation** ([`models`]) - `SimulationConfig` and the values it is built from
//! - **Static Knowledge** ([`registry`]) - Directive keywords and per-style argument rules
//! - **File I/O** ([`io`]) - Reading and writing LAMMPS-style input scripts
//!
//! Nothing in this layer performs whole-deck consistency checks; those live in
//! the engine so that a deck can be read, inspected and rewritten even when it
//! would be rejected at load time.

pub mod io;
pub mod models;
pub mod registry;
