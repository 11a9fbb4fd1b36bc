use crate::core::models::styles::InteractionKind;
use phf::{Map, phf_map};
use std::fmt;

/// An inclusive range of accepted argument counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn accepts(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else if self.max == usize::MAX {
            write!(f, "at least {}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// What a known style accepts on its `*_style` line and on each `*_coeff` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
    pub args: Arity,
    pub coeffs: Arity,
    /// Non-numeric words allowed among the style arguments.
    pub keywords: &'static [&'static str],
}

impl StyleRule {
    const fn new(args: Arity, coeffs: Arity) -> Self {
        Self {
            args,
            coeffs,
            keywords: &[],
        }
    }

    const fn with_keywords(args: Arity, coeffs: Arity, keywords: &'static [&'static str]) -> Self {
        Self {
            args,
            coeffs,
            keywords,
        }
    }
}

const fn exactly(n: usize) -> Arity {
    Arity::exactly(n)
}

const fn range(min: usize, max: usize) -> Arity {
    Arity::range(min, max)
}

static PAIR_STYLES: Map<&'static str, StyleRule> = phf_map! {
    "lj/cut" => StyleRule::new(exactly(1), range(2, 3)),
    "lj/cut/coul/cut" => StyleRule::new(range(1, 2), range(2, 4)),
    "lj/cut/coul/long" => StyleRule::new(range(1, 2), range(2, 3)),
    "lj/cut/coul/debye" => StyleRule::new(range(2, 3), range(2, 4)),
    "lj/cut/tip4p/long" => StyleRule::new(range(6, 7), range(2, 3)),
    "lj/cut/tip4p/cut" => StyleRule::new(range(6, 7), range(2, 3)),
    "lj/charmm/coul/long" => StyleRule::new(range(2, 3), range(2, 4)),
    "coul/cut" => StyleRule::new(exactly(1), range(0, 1)),
    "coul/long" => StyleRule::new(exactly(1), exactly(0)),
    "coul/debye" => StyleRule::new(exactly(2), range(0, 1)),
    "buck" => StyleRule::new(exactly(1), range(3, 4)),
    "buck/coul/cut" => StyleRule::new(range(1, 2), range(3, 5)),
    "buck/coul/long" => StyleRule::new(range(1, 2), range(3, 4)),
    "morse" => StyleRule::new(exactly(1), range(3, 4)),
    "born" => StyleRule::new(exactly(1), range(5, 6)),
    "soft" => StyleRule::new(exactly(1), range(1, 2)),
    "yukawa" => StyleRule::new(exactly(2), range(1, 2)),
    "zero" => StyleRule::with_keywords(range(1, 2), range(0, 1), &["nocoeff"]),
    "none" => StyleRule::new(exactly(0), exactly(0)),
};

static BOND_STYLES: Map<&'static str, StyleRule> = phf_map! {
    "harmonic" => StyleRule::new(exactly(0), exactly(2)),
    "class2" => StyleRule::new(exactly(0), exactly(4)),
    "morse" => StyleRule::new(exactly(0), exactly(3)),
    "fene" => StyleRule::new(exactly(0), exactly(4)),
    "fene/expand" => StyleRule::new(exactly(0), exactly(5)),
    "gromos" => StyleRule::new(exactly(0), exactly(2)),
    "zero" => StyleRule::with_keywords(range(0, 1), range(0, 1), &["nocoeff"]),
    "none" => StyleRule::new(exactly(0), exactly(0)),
};

static ANGLE_STYLES: Map<&'static str, StyleRule> = phf_map! {
    "harmonic" => StyleRule::new(exactly(0), exactly(2)),
    "cosine" => StyleRule::new(exactly(0), exactly(1)),
    "cosine/squared" => StyleRule::new(exactly(0), exactly(2)),
    "cosine/harmonic" => StyleRule::new(exactly(0), exactly(2)),
    "charmm" => StyleRule::new(exactly(0), exactly(4)),
    "zero" => StyleRule::with_keywords(range(0, 1), range(0, 1), &["nocoeff"]),
    "none" => StyleRule::new(exactly(0), exactly(0)),
};

static DIHEDRAL_STYLES: Map<&'static str, StyleRule> = phf_map! {
    "harmonic" => StyleRule::new(exactly(0), exactly(3)),
    "charmm" => StyleRule::new(exactly(0), exactly(4)),
    "opls" => StyleRule::new(exactly(0), exactly(4)),
    "multi/harmonic" => StyleRule::new(exactly(0), exactly(5)),
    "quadratic" => StyleRule::new(exactly(0), exactly(2)),
    "none" => StyleRule::new(exactly(0), exactly(0)),
};

static IMPROPER_STYLES: Map<&'static str, StyleRule> = phf_map! {
    "harmonic" => StyleRule::new(exactly(0), exactly(2)),
    "cvff" => StyleRule::new(exactly(0), exactly(3)),
    "umbrella" => StyleRule::new(exactly(0), exactly(2)),
    "none" => StyleRule::new(exactly(0), exactly(0)),
};

/// Known k-space solvers and how many arguments follow the style name
/// (the first one, when present, is the relative accuracy).
static KSPACE_STYLES: Map<&'static str, Arity> = phf_map! {
    "ewald" => Arity::exactly(1),
    "ewald/disp" => Arity::exactly(1),
    "pppm" => Arity::exactly(1),
    "pppm/tip4p" => Arity::exactly(1),
    "pppm/cg" => Arity::range(1, 2),
    "pppm/disp" => Arity::exactly(1),
    "pppm/dipole" => Arity::exactly(1),
    "msm" => Arity::exactly(1),
    "msm/cg" => Arity::range(1, 2),
    "none" => Arity::exactly(0),
};

pub fn style_rule(kind: InteractionKind, name: &str) -> Option<&'static StyleRule> {
    let table = match kind {
        InteractionKind::Pair => &PAIR_STYLES,
        InteractionKind::Bond => &BOND_STYLES,
        InteractionKind::Angle => &ANGLE_STYLES,
        InteractionKind::Dihedral => &DIHEDRAL_STYLES,
        InteractionKind::Improper => &IMPROPER_STYLES,
    };
    table.get(name)
}

pub fn kspace_arity(name: &str) -> Option<Arity> {
    KSPACE_STYLES.get(name).copied()
}
