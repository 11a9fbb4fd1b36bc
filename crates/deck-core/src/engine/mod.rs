//! # Engine Module
//!
//! Everything between reading a script and handing a configuration to the
//! caller: how a deck is loaded, which whole-deck rules it must satisfy, and
//! how progress and failures are reported.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Load options and their builder
//! - **Validation** ([`validate`]) - Cross-directive consistency checks, collected per deck
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for batch work
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping every lower layer

pub mod config;
pub mod error;
pub mod progress;
pub mod validate;
