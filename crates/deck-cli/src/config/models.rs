use crate::cli::OutputFormat;
use lmpdeck::engine::config::LoadConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub load: LoadConfig,
    pub output_format: OutputFormat,
}
