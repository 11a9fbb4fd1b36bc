use crate::core::models::config::SimulationConfig;
use crate::engine::config::LoadConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::workflows::load;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The outcome of loading one deck of a batch.
#[derive(Debug)]
pub struct DeckReport {
    pub path: PathBuf,
    pub result: Result<SimulationConfig, EngineError>,
}

impl DeckReport {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct CheckSummary {
    /// One report per input path, in input order.
    pub reports: Vec<DeckReport>,
}

impl CheckSummary {
    pub fn failures(&self) -> impl Iterator<Item = &DeckReport> {
        self.reports.iter().filter(|r| !r.passed())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Loads every deck independently and collects the outcomes.
///
/// A failing deck never stops the batch.
#[instrument(skip_all, name = "check_workflow", fields(decks = paths.len()))]
pub fn run<P>(paths: &[P], config: &LoadConfig, reporter: &ProgressReporter) -> CheckSummary
where
    P: AsRef<Path> + Sync,
{
    reporter.report(Progress::PhaseStart {
        name: "Checking decks",
    });
    reporter.report(Progress::TaskStart {
        total_steps: paths.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = paths.iter();

    #[cfg(feature = "parallel")]
    let iterator = paths.par_iter();

    let reports: Vec<DeckReport> = iterator
        .map(|path| check_one(path.as_ref(), config, reporter))
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let summary = CheckSummary { reports };
    info!(
        passed = summary.reports.len() - summary.failed_count(),
        failed = summary.failed_count(),
        "Batch check complete."
    );
    summary
}

fn check_one(path: &Path, config: &LoadConfig, reporter: &ProgressReporter) -> DeckReport {
    let result = load::run(path, config);
    if let Err(e) = &result {
        warn!(path = %path.display(), "Deck rejected: {}", e);
    }
    reporter.report(Progress::DeckChecked {
        path: path.to_path_buf(),
        passed: result.is_ok(),
    });
    reporter.report(Progress::TaskIncrement);
    DeckReport {
        path: path.to_path_buf(),
        result,
    }
}
