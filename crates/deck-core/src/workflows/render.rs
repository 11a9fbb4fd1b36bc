use crate::core::io::traits::DeckFile;
use crate::core::models::config::SimulationConfig;
use crate::engine::config::LoadConfig;
use crate::engine::error::EngineError;
use crate::workflows::load;
use tracing::instrument;

/// Serializes a deck as a TOML document.
#[instrument(skip_all, name = "render_to_toml")]
pub fn to_toml(config: &SimulationConfig) -> Result<String, EngineError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Builds a deck from a TOML document.
///
/// The document is rendered as a script and read back, so it passes the same
/// per-directive and ordering rules as a hand-written deck before the
/// consistency checks run.
#[instrument(skip_all, name = "render_from_toml")]
pub fn from_toml(text: &str, config: &LoadConfig) -> Result<SimulationConfig, EngineError> {
    let described: SimulationConfig = toml::from_str(text)?;
    let script = config.script();
    let rendered = script.write_to_string(&described)?;
    let deck = script
        .read_from_str(&rendered)
        .map_err(|source| EngineError::Description { source })?;
    load::finish(deck, config)
}
