use crate::core::io::lammps::LammpsScript;
use crate::core::io::traits::DeckFile;
use crate::core::models::config::SimulationConfig;
use crate::engine::error::EngineError;
use tracing::instrument;

/// Renders a deck as a canonical LAMMPS script.
#[instrument(skip_all, name = "format_workflow")]
pub fn run(config: &SimulationConfig) -> Result<String, EngineError> {
    Ok(LammpsScript::strict().write_to_string(config)?)
}
