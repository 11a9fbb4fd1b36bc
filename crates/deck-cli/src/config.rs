//! Settings for deck-loading commands.
//!
//! Values are merged in increasing priority: built-in defaults, the TOML
//! settings file, `-S key=value` overrides and finally explicit flags.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
