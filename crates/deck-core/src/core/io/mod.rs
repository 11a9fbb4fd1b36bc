//! Provides input/output functionality for simulation input decks.
//!
//! This module contains the LAMMPS-style script reader and writer together
//! with the trait-based interface shared by every deck format.

pub mod lammps;
pub mod traits;
