use crate::cli::OutputFormat;
use lmpdeck::core::io::lammps::Strictness;

pub struct DefaultsConfig {
    pub strictness: Strictness,
    pub consistency_checks: bool,
    pub output_format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::Strict,
            consistency_checks: true,
            output_format: OutputFormat::Summary,
        }
    }
}
