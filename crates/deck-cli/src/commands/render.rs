use super::emit;
use crate::cli::RenderArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use lmpdeck::workflows;
use tracing::info;

pub fn run(args: RenderArgs) -> Result<()> {
    let app = build_config(&args.load, None)?;

    info!("Reading deck description from {:?}", &args.input);
    let text = std::fs::read_to_string(&args.input)?;
    let deck = workflows::render::from_toml(&text, &app.load)
        .map_err(|e| CliError::file_parsing(&args.input, e))?;

    let script = workflows::format::run(&deck)?;
    emit(&script, args.output.as_deref())
}
