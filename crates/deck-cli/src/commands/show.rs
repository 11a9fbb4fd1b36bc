use super::emit;
use crate::cli::{OutputFormat, ShowArgs};
use crate::config::build_config;
use crate::error::{CliError, Result};
use lmpdeck::core::models::config::SimulationConfig;
use lmpdeck::core::models::params::format_float;
use lmpdeck::core::models::styles::InteractionKind;
use lmpdeck::workflows;
use std::fmt::Write;
use tracing::info;

pub fn run(args: ShowArgs) -> Result<()> {
    let app = build_config(&args.load, args.format)?;

    info!("Loading deck from {:?}", &args.input);
    let deck = workflows::load::run(&args.input, &app.load)
        .map_err(|e| CliError::file_parsing(&args.input, e))?;

    let text = match app.output_format {
        OutputFormat::Summary => summarize(&deck),
        OutputFormat::Toml => workflows::render::to_toml(&deck)?,
        OutputFormat::Script => workflows::format::run(&deck)?,
    };
    emit(&text, None)
}

fn summarize(deck: &SimulationConfig) -> String {
    let units = deck.effective_units();
    let mut out = String::new();

    let mut row = |label: &str, value: String| {
        let _ = writeln!(out, "  {:<14}{}", format!("{}:", label), value);
    };

    row("Units", units.to_string());
    row("Atom style", deck.effective_atom_style().to_string());
    row("Dimension", deck.effective_dimension().to_string());
    row(
        "Boundary",
        deck.boundary
            .as_ref()
            .map(|b| b.join(" "))
            .unwrap_or_else(|| "p p p".to_string()),
    );

    let styles: Vec<String> = deck
        .styles
        .iter()
        .map(|(kind, style)| format!("{} {}", kind, style.name))
        .collect();
    row("Styles", join_or_none(&styles));

    row(
        "K-space",
        match &deck.kspace {
            Some(k) => match k.accuracy {
                Some(accuracy) => format!("{} (accuracy {})", k.name, format_float(accuracy)),
                None => k.name.clone(),
            },
            None => "none".to_string(),
        },
    );
    row("Data file", deck.read_data.path.display().to_string());

    let counts: Vec<String> = InteractionKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let n = deck.coefficients_of(kind).count();
            (n > 0).then(|| format!("{} {}", n, kind))
        })
        .collect();
    row("Coefficients", join_or_none(&counts));

    let neighbor = deck.effective_neighbor();
    row(
        "Neighbor",
        format!("{} {}", format_float(neighbor.skin), neighbor.build),
    );
    row(
        "Timestep",
        format!("{} {}", format_float(deck.effective_timestep()), units.time_unit()),
    );

    let fixes: Vec<String> = deck
        .fixes
        .iter()
        .map(|f| format!("{} ({})", f.id, f.style))
        .collect();
    row("Fixes", join_or_none(&fixes));

    for (fix, coupling) in deck.driver_couplings() {
        let value = match coupling {
            Ok(c) => format!("fix {} -> {} (port {})", fix.id, c.endpoint(), c.port),
            Err(e) => format!("fix {} -> invalid: {}", fix.id, e),
        };
        row("Driver", value);
    }

    if !deck.commands.is_empty() {
        row("Commands", format!("{} pass-through", deck.commands.len()));
    }
    row(
        "Run",
        format!(
            "{} step(s), {} {}",
            deck.run.steps,
            format_float(deck.simulated_time()),
            units.time_unit()
        ),
    );

    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
