use crate::cli::CheckArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use lmpdeck::engine::progress::ProgressReporter;
use lmpdeck::workflows;
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    let app = build_config(&args.load, None)?;
    info!(
        strictness = %app.load.strictness,
        checks = app.load.consistency_checks,
        "Checking {} deck(s).",
        args.inputs.len()
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let summary = workflows::check::run(&args.inputs, &app.load, &reporter);

    for report in &summary.reports {
        match &report.result {
            Ok(deck) => println!(
                "✓ {} ({} step(s), {} fix(es))",
                report.path.display(),
                deck.run.steps,
                deck.fixes.len()
            ),
            Err(e) => println!("✗ {}\n    {}", report.path.display(), indent(&e.to_string())),
        }
    }

    let failed = summary.failed_count();
    if failed > 0 {
        return Err(CliError::ChecksFailed {
            failed,
            total: summary.reports.len(),
        });
    }
    println!("All {} deck(s) passed.", summary.reports.len());
    Ok(())
}

fn indent(text: &str) -> String {
    text.replace('\n', "\n    ")
}
