use crate::core::io::traits::DeckFile;
use crate::core::models::config::SimulationConfig;
use crate::engine::config::LoadConfig;
use crate::engine::error::EngineError;
use crate::engine::validate::validate;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Reads and validates the deck at `path`.
#[instrument(skip_all, name = "load_workflow", fields(path = %path.display()))]
pub fn run(path: &Path, config: &LoadConfig) -> Result<SimulationConfig, EngineError> {
    let deck = config.script().read_from_path(path)?;
    finish(deck, config)
}

/// Reads and validates a deck held in memory.
#[instrument(skip_all, name = "load_workflow")]
pub fn from_str(text: &str, config: &LoadConfig) -> Result<SimulationConfig, EngineError> {
    let deck = config.script().read_from_str(text)?;
    finish(deck, config)
}

pub(crate) fn finish(
    deck: SimulationConfig,
    config: &LoadConfig,
) -> Result<SimulationConfig, EngineError> {
    if config.consistency_checks {
        validate(&deck)?;
    } else {
        debug!("Consistency checks disabled; skipping validation.");
    }

    info!(
        units = %deck.effective_units(),
        coefficients = deck.coefficients.len(),
        fixes = deck.fixes.len(),
        steps = deck.run.steps,
        "Deck loaded."
    );
    Ok(deck)
}
