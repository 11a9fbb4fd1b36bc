use crate::core::models::config::SimulationConfig;
use crate::core::models::styles::{AtomStyle, InteractionKind};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// A single inconsistency between directives that are each valid on their own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    #[error("kspace_style '{kspace}' requires a long-range pair style (found {})", describe(.pair))]
    KSpaceWithoutLongRangePair { kspace: String, pair: Option<String> },

    #[error("pair_style '{pair}' requires a kspace_style")]
    LongRangePairWithoutKSpace { pair: String },

    #[error("kspace_style {} and pair_style {} must both be tip4p variants", describe(.kspace), describe(.pair))]
    Tip4pMismatch {
        kspace: Option<String>,
        pair: Option<String>,
    },

    #[error("pair_style '{pair}' requires a {missing} style for the water geometry")]
    Tip4pMissingTopology {
        pair: String,
        missing: InteractionKind,
    },

    #[error("atom style '{atom_style}' does not allow {kind} interactions")]
    TopologyNotAllowed {
        atom_style: AtomStyle,
        kind: InteractionKind,
    },

    #[error("{count} {kind}_coeff line(s) without a {kind}_style")]
    CoefficientWithoutStyle { kind: InteractionKind, count: usize },

    #[error("only one driver fix may couple the engine, found {}", .ids.join(", "))]
    MultipleDrivers { ids: Vec<String> },

    #[error("driver fix '{id}': {reason}")]
    InvalidDriver { id: String, reason: String },

    #[error("a 2d simulation needs a periodic z boundary (found '{flag}')")]
    NonPeriodicZ { flag: String },
}

fn describe(name: &Option<String>) -> String {
    name.as_ref()
        .map(|n| format!("'{}'", n))
        .unwrap_or_else(|| "none".to_string())
}

/// All consistency issues found in one deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck failed {} consistency check(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Runs every whole-deck check and reports all violations together.
pub fn validate(config: &SimulationConfig) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    check_topology(config, &mut issues);
    check_long_range(config, &mut issues);
    check_tip4p(config, &mut issues);
    check_drivers(config, &mut issues);
    check_dimension(config, &mut issues);

    debug!(issues = issues.len(), "Consistency checks finished.");
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

fn check_topology(config: &SimulationConfig, issues: &mut Vec<Issue>) {
    let atom_style = config.effective_atom_style();
    for (kind, _) in config.styles.iter() {
        if !atom_style.allows(kind) {
            issues.push(Issue::TopologyNotAllowed { atom_style, kind });
        }
    }
    for kind in InteractionKind::ALL {
        let count = config.coefficients_of(kind).count();
        if count > 0 && config.styles.get(kind).is_none() {
            issues.push(Issue::CoefficientWithoutStyle { kind, count });
        }
    }
}

fn check_long_range(config: &SimulationConfig, issues: &mut Vec<Issue>) {
    let pair = config.styles.pair.as_ref();
    let kspace = config.kspace.as_ref().filter(|k| !k.is_none());

    match (kspace, pair) {
        (Some(kspace), pair) if !pair.is_some_and(|p| p.is_long_range()) => {
            issues.push(Issue::KSpaceWithoutLongRangePair {
                kspace: kspace.name.clone(),
                pair: pair.map(|p| p.name.clone()),
            });
        }
        (None, Some(pair)) if pair.is_long_range() => {
            issues.push(Issue::LongRangePairWithoutKSpace {
                pair: pair.name.clone(),
            });
        }
        _ => {}
    }
}

fn check_tip4p(config: &SimulationConfig, issues: &mut Vec<Issue>) {
    let pair = config.styles.pair.as_ref();
    let kspace = config.kspace.as_ref().filter(|k| !k.is_none());

    let kspace_tip4p = kspace.is_some_and(|k| k.is_tip4p());
    let pair_tip4p = pair.is_some_and(|p| p.is_tip4p());
    // A cut-off tip4p pair style runs without any solver.
    let pair_needs_solver = pair.is_some_and(|p| p.is_tip4p() && p.is_long_range());

    if (kspace_tip4p && !pair_tip4p) || (pair_needs_solver && kspace.is_some() && !kspace_tip4p) {
        issues.push(Issue::Tip4pMismatch {
            kspace: kspace.map(|k| k.name.clone()),
            pair: pair.map(|p| p.name.clone()),
        });
    }

    if let Some(pair) = pair.filter(|p| p.is_tip4p()) {
        for missing in [InteractionKind::Bond, InteractionKind::Angle] {
            if config.styles.get(missing).is_none() {
                issues.push(Issue::Tip4pMissingTopology {
                    pair: pair.name.clone(),
                    missing,
                });
            }
        }
    }
}

fn check_drivers(config: &SimulationConfig, issues: &mut Vec<Issue>) {
    let mut ids = Vec::new();
    for (fix, coupling) in config.driver_couplings() {
        ids.push(fix.id.clone());
        if let Err(e) = coupling {
            issues.push(Issue::InvalidDriver {
                id: fix.id.clone(),
                reason: e.to_string(),
            });
        }
    }
    if ids.len() > 1 {
        issues.push(Issue::MultipleDrivers { ids });
    }
}

fn check_dimension(config: &SimulationConfig, issues: &mut Vec<Issue>) {
    if config.effective_dimension() != 2 {
        return;
    }
    if let Some(flag) = config.boundary.as_ref().and_then(|b| b.get(2)) {
        if flag != "p" {
            issues.push(Issue::NonPeriodicZ { flag: flag.clone() });
        }
    }
}
