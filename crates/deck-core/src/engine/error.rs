use thiserror::Error;

use super::config::ConfigError;
use super::validate::ValidationError;
use crate::core::io::lammps::error::ScriptError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read deck: {source}")]
    Script {
        #[from]
        source: ScriptError,
    },

    #[error("TOML deck description does not form a valid script: {source}")]
    Description {
        #[source]
        source: ScriptError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid load configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid TOML deck description: {source}")]
    TomlDe {
        #[from]
        source: toml::de::Error,
    },

    #[error("Failed to serialize deck as TOML: {source}")]
    TomlSer {
        #[from]
        source: toml::ser::Error,
    },
}

impl EngineError {
    /// The script line the error points at, when it comes from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Script { source } => source.line(),
            _ => None,
        }
    }
}
