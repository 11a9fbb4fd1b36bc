use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The physical unit system selected by the `units` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Lj,
    Real,
    Metal,
    Si,
    Cgs,
    Electron,
    Micro,
    Nano,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown unit system '{0}'")]
pub struct ParseUnitSystemError(pub String);

impl UnitSystem {
    pub const ALL: [UnitSystem; 8] = [
        Self::Lj,
        Self::Real,
        Self::Metal,
        Self::Si,
        Self::Cgs,
        Self::Electron,
        Self::Micro,
        Self::Nano,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Lj => "lj",
            Self::Real => "real",
            Self::Metal => "metal",
            Self::Si => "si",
            Self::Cgs => "cgs",
            Self::Electron => "electron",
            Self::Micro => "micro",
            Self::Nano => "nano",
        }
    }

    /// Timestep the engine uses when the deck does not set one.
    pub fn default_timestep(&self) -> f64 {
        match self {
            Self::Lj => 0.005,
            Self::Real => 1.0,
            Self::Metal => 0.001,
            Self::Si | Self::Cgs => 1.0e-8,
            Self::Electron => 0.001,
            Self::Micro => 2.0,
            Self::Nano => 0.00045,
        }
    }

    /// Neighbor skin distance the engine uses when the deck does not set one.
    pub fn default_neighbor_skin(&self) -> f64 {
        match self {
            Self::Lj => 0.3,
            Self::Real | Self::Metal | Self::Electron => 2.0,
            Self::Si => 0.001,
            Self::Cgs | Self::Micro | Self::Nano => 0.1,
        }
    }

    pub fn time_unit(&self) -> &'static str {
        match self {
            Self::Lj => "tau",
            Self::Real => "fs",
            Self::Metal => "ps",
            Self::Si | Self::Cgs => "s",
            Self::Electron => "fs",
            Self::Micro => "us",
            Self::Nano => "ns",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = ParseUnitSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.keyword() == s)
            .ok_or_else(|| ParseUnitSystemError(s.to_string()))
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
