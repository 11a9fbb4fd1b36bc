use super::coeff::CoeffDecl;
use super::fix::{DriverArgError, DriverCoupling, FixDecl};
use super::styles::{AtomStyle, InteractionKind, KSpaceDecl, NeighborSettings, Styles};
use super::units::UnitSystem;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The `read_data` directive: the data file and any trailing keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadData {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// The `run` directive: step count plus optional keywords (`upto`, `pre`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    pub steps: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// A directive that is carried to the engine verbatim.
///
/// `before_box` records that the command appeared before `read_data`; the
/// writer keeps such commands ahead of the box so setup commands like
/// `atom_modify` or `processors` stay where the engine accepts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawCommand {
    pub keyword: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub before_box: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl RawCommand {
    pub fn new(keyword: impl Into<String>, args: Vec<String>, before_box: bool) -> Self {
        Self {
            keyword: keyword.into(),
            args,
            before_box,
        }
    }
}

/// A fully parsed input deck.
///
/// Built once from a script (or a TOML description) and handed to the engine
/// unchanged. Settings the deck leaves out stay `None`; the `effective_*`
/// accessors resolve them to the engine's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SimulationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atom_style: Option<AtomStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestep: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermo: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neigh_modify: Vec<Vec<String>>,
    pub read_data: ReadData,
    #[serde(default)]
    pub styles: Styles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kspace: Option<KSpaceDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbor: Option<NeighborSettings>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coefficients: Vec<CoeffDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<FixDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<RawCommand>,
    pub run: RunSpec,
}

impl SimulationConfig {
    pub fn effective_units(&self) -> UnitSystem {
        self.units.unwrap_or_default()
    }

    pub fn effective_atom_style(&self) -> AtomStyle {
        self.atom_style.unwrap_or_default()
    }

    pub fn effective_timestep(&self) -> f64 {
        self.timestep
            .unwrap_or_else(|| self.effective_units().default_timestep())
    }

    pub fn effective_neighbor(&self) -> NeighborSettings {
        self.neighbor.unwrap_or_else(|| NeighborSettings {
            skin: self.effective_units().default_neighbor_skin(),
            build: Default::default(),
        })
    }

    pub fn effective_dimension(&self) -> u8 {
        self.dimension.unwrap_or(3)
    }

    pub fn coefficients_of(&self, kind: InteractionKind) -> impl Iterator<Item = &CoeffDecl> {
        self.coefficients.iter().filter(move |c| c.kind == kind)
    }

    pub fn fix(&self, id: &str) -> Option<&FixDecl> {
        self.fixes.iter().find(|f| f.id == id)
    }

    /// All driver fixes in declaration order, with their parsed couplings.
    pub fn driver_couplings(
        &self,
    ) -> impl Iterator<Item = (&FixDecl, Result<DriverCoupling, DriverArgError>)> {
        self.fixes
            .iter()
            .filter_map(|fix| fix.driver_coupling().map(|coupling| (fix, coupling)))
    }

    /// Total simulated time covered by the `run` directive, in the deck's time unit.
    pub fn simulated_time(&self) -> f64 {
        self.run.steps as f64 * self.effective_timestep()
    }
}
