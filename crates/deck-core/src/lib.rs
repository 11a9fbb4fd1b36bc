//! # lmpdeck Core Library
//!
//! Loads, validates and rewrites LAMMPS input decks for simulations whose
//! integration is handed to an external driver over a socket.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SimulationConfig`),
//!   static directive and style tables, and the script reader and writer.
//!
//! - **[`engine`]: The Logic Core.** Load options, whole-deck consistency
//!   validation, progress reporting and the engine-level error type.
//!
//! - **[`workflows`]: The Public API.** Entry points that tie `engine` and
//!   `core` together: load a deck, check many decks in parallel, format a
//!   deck canonically and convert between scripts and TOML.

pub mod core;
pub mod engine;
pub mod workflows;
