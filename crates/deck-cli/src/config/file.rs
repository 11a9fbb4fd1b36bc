use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use lmpdeck::core::io::lammps::Strictness;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileParserConfig {
    pub strictness: Option<Strictness>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileValidationConfig {
    #[serde(rename = "consistency-checks")]
    pub consistency_checks: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub parser: Option<FileParserConfig>,
    pub validation: Option<FileValidationConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading settings from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::file_parsing(path, e))
    }
}
