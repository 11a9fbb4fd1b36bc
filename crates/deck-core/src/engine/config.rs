use crate::core::io::lammps::{LammpsScript, Strictness};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Options that control how a deck is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadConfig {
    pub strictness: Strictness,
    /// Run the whole-deck consistency checks after parsing.
    pub consistency_checks: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::Strict,
            consistency_checks: true,
        }
    }
}

impl LoadConfig {
    pub fn script(&self) -> LammpsScript {
        LammpsScript::new(self.strictness)
    }
}

#[derive(Default)]
pub struct LoadConfigBuilder {
    strictness: Option<Strictness>,
    consistency_checks: Option<bool>,
}

impl LoadConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = Some(strictness);
        self
    }
    pub fn consistency_checks(mut self, enabled: bool) -> Self {
        self.consistency_checks = Some(enabled);
        self
    }

    pub fn build(self) -> Result<LoadConfig, ConfigError> {
        Ok(LoadConfig {
            strictness: self
                .strictness
                .ok_or(ConfigError::MissingParameter("strictness"))?,
            consistency_checks: self
                .consistency_checks
                .ok_or(ConfigError::MissingParameter("consistency_checks"))?,
        })
    }
}
