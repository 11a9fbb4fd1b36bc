use super::params::Param;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomStyle {
    #[default]
    Atomic,
    Charge,
    Bond,
    Angle,
    Molecular,
    Full,
    Sphere,
    Dipole,
    Ellipsoid,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown atom style '{0}'")]
pub struct ParseAtomStyleError(pub String);

impl AtomStyle {
    pub const ALL: [AtomStyle; 9] = [
        Self::Atomic,
        Self::Charge,
        Self::Bond,
        Self::Angle,
        Self::Molecular,
        Self::Full,
        Self::Sphere,
        Self::Dipole,
        Self::Ellipsoid,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::Charge => "charge",
            Self::Bond => "bond",
            Self::Angle => "angle",
            Self::Molecular => "molecular",
            Self::Full => "full",
            Self::Sphere => "sphere",
            Self::Dipole => "dipole",
            Self::Ellipsoid => "ellipsoid",
        }
    }

    /// Whether atoms of this style carry the topology a bonded style needs.
    pub fn allows(&self, kind: InteractionKind) -> bool {
        match kind {
            InteractionKind::Pair => true,
            InteractionKind::Bond => {
                matches!(self, Self::Bond | Self::Angle | Self::Molecular | Self::Full)
            }
            InteractionKind::Angle => matches!(self, Self::Angle | Self::Molecular | Self::Full),
            InteractionKind::Dihedral | InteractionKind::Improper => {
                matches!(self, Self::Molecular | Self::Full)
            }
        }
    }
}

impl FromStr for AtomStyle {
    type Err = ParseAtomStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.keyword() == s)
            .ok_or_else(|| ParseAtomStyleError(s.to_string()))
    }
}

impl fmt::Display for AtomStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The family an interaction style (and its coefficients) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Pair,
    Bond,
    Angle,
    Dihedral,
    Improper,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 5] = [
        Self::Pair,
        Self::Bond,
        Self::Angle,
        Self::Dihedral,
        Self::Improper,
    ];

    pub fn style_keyword(&self) -> &'static str {
        match self {
            Self::Pair => "pair_style",
            Self::Bond => "bond_style",
            Self::Angle => "angle_style",
            Self::Dihedral => "dihedral_style",
            Self::Improper => "improper_style",
        }
    }

    pub fn coeff_keyword(&self) -> &'static str {
        match self {
            Self::Pair => "pair_coeff",
            Self::Bond => "bond_coeff",
            Self::Angle => "angle_coeff",
            Self::Dihedral => "dihedral_coeff",
            Self::Improper => "improper_coeff",
        }
    }

    /// Number of type selectors that lead a coefficient line.
    pub fn type_count(&self) -> usize {
        match self {
            Self::Pair => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pair => "pair",
            Self::Bond => "bond",
            Self::Angle => "angle",
            Self::Dihedral => "dihedral",
            Self::Improper => "improper",
        })
    }
}

/// A `*_style` declaration: the style name and its global arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDecl {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Param>,
}

impl StyleDecl {
    pub fn new(name: impl Into<String>, args: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn is_long_range(&self) -> bool {
        self.name.contains("long") || self.name.contains("msm")
    }

    pub fn is_tip4p(&self) -> bool {
        self.name.contains("tip4p")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Styles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<StyleDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bond: Option<StyleDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<StyleDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dihedral: Option<StyleDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improper: Option<StyleDecl>,
}

impl Styles {
    pub fn get(&self, kind: InteractionKind) -> Option<&StyleDecl> {
        match kind {
            InteractionKind::Pair => self.pair.as_ref(),
            InteractionKind::Bond => self.bond.as_ref(),
            InteractionKind::Angle => self.angle.as_ref(),
            InteractionKind::Dihedral => self.dihedral.as_ref(),
            InteractionKind::Improper => self.improper.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, kind: InteractionKind) -> &mut Option<StyleDecl> {
        match kind {
            InteractionKind::Pair => &mut self.pair,
            InteractionKind::Bond => &mut self.bond,
            InteractionKind::Angle => &mut self.angle,
            InteractionKind::Dihedral => &mut self.dihedral,
            InteractionKind::Improper => &mut self.improper,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (InteractionKind, &StyleDecl)> {
        InteractionKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|decl| (kind, decl)))
    }
}

/// The long-range solver selected by `kspace_style`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KSpaceDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub args: Vec<Param>,
}

impl KSpaceDecl {
    pub fn is_none(&self) -> bool {
        self.name == "none"
    }

    pub fn is_tip4p(&self) -> bool {
        self.name.contains("tip4p")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborBuild {
    #[default]
    Bin,
    Nsq,
    Multi,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown neighbor build style '{0}'")]
pub struct ParseNeighborBuildError(pub String);

impl FromStr for NeighborBuild {
    type Err = ParseNeighborBuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bin" => Ok(Self::Bin),
            "nsq" => Ok(Self::Nsq),
            "multi" => Ok(Self::Multi),
            _ => Err(ParseNeighborBuildError(s.to_string())),
        }
    }
}

impl fmt::Display for NeighborBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bin => "bin",
            Self::Nsq => "nsq",
            Self::Multi => "multi",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeighborSettings {
    pub skin: f64,
    pub build: NeighborBuild,
}
