use super::emit;
use crate::cli::FormatArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use lmpdeck::workflows;
use tracing::info;

pub fn run(args: FormatArgs) -> Result<()> {
    let app = build_config(&args.load, None)?;

    info!("Loading deck from {:?}", &args.input);
    let deck = workflows::load::run(&args.input, &app.load)
        .map_err(|e| CliError::file_parsing(&args.input, e))?;

    let text = workflows::format::run(&deck)?;
    emit(&text, args.output.as_deref())
}
