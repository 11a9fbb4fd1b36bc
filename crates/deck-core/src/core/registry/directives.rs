use crate::core::models::styles::InteractionKind;
use phf::{Map, phf_map};

/// What the interpreter does with a directive keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Units,
    Dimension,
    Boundary,
    AtomStyle,
    Style(InteractionKind),
    Coeff(InteractionKind),
    KSpaceStyle,
    ReadData,
    Neighbor,
    NeighModify,
    Timestep,
    Thermo,
    Fix,
    Unfix,
    Run,
    /// Recognized by the engine but carried through without interpretation.
    PassThrough,
}

static DIRECTIVES: Map<&'static str, Directive> = phf_map! {
    "units" => Directive::Units,
    "dimension" => Directive::Dimension,
    "boundary" => Directive::Boundary,
    "atom_style" => Directive::AtomStyle,
    "pair_style" => Directive::Style(InteractionKind::Pair),
    "bond_style" => Directive::Style(InteractionKind::Bond),
    "angle_style" => Directive::Style(InteractionKind::Angle),
    "dihedral_style" => Directive::Style(InteractionKind::Dihedral),
    "improper_style" => Directive::Style(InteractionKind::Improper),
    "pair_coeff" => Directive::Coeff(InteractionKind::Pair),
    "bond_coeff" => Directive::Coeff(InteractionKind::Bond),
    "angle_coeff" => Directive::Coeff(InteractionKind::Angle),
    "dihedral_coeff" => Directive::Coeff(InteractionKind::Dihedral),
    "improper_coeff" => Directive::Coeff(InteractionKind::Improper),
    "kspace_style" => Directive::KSpaceStyle,
    "read_data" => Directive::ReadData,
    "neighbor" => Directive::Neighbor,
    "neigh_modify" => Directive::NeighModify,
    "timestep" => Directive::Timestep,
    "thermo" => Directive::Thermo,
    "fix" => Directive::Fix,
    "unfix" => Directive::Unfix,
    "run" => Directive::Run,

    "velocity" => Directive::PassThrough,
    "thermo_style" => Directive::PassThrough,
    "thermo_modify" => Directive::PassThrough,
    "dump" => Directive::PassThrough,
    "dump_modify" => Directive::PassThrough,
    "undump" => Directive::PassThrough,
    "group" => Directive::PassThrough,
    "variable" => Directive::PassThrough,
    "special_bonds" => Directive::PassThrough,
    "pair_modify" => Directive::PassThrough,
    "kspace_modify" => Directive::PassThrough,
    "compute" => Directive::PassThrough,
    "uncompute" => Directive::PassThrough,
    "mass" => Directive::PassThrough,
    "restart" => Directive::PassThrough,
    "write_data" => Directive::PassThrough,
    "write_restart" => Directive::PassThrough,
    "reset_timestep" => Directive::PassThrough,
    "min_style" => Directive::PassThrough,
    "minimize" => Directive::PassThrough,
    "print" => Directive::PassThrough,
    "log" => Directive::PassThrough,
    "echo" => Directive::PassThrough,
    "atom_modify" => Directive::PassThrough,
    "comm_modify" => Directive::PassThrough,
    "processors" => Directive::PassThrough,
    "newton" => Directive::PassThrough,
    "region" => Directive::PassThrough,
    "displace_atoms" => Directive::PassThrough,
    "delete_bonds" => Directive::PassThrough,
    "set" => Directive::PassThrough,
    "package" => Directive::PassThrough,
    "suffix" => Directive::PassThrough,
    "balance" => Directive::PassThrough,
};

pub fn lookup(keyword: &str) -> Option<Directive> {
    DIRECTIVES.get(keyword).copied()
}

impl Directive {
    /// Directives that may appear at most once per deck.
    pub fn is_singleton(&self) -> bool {
        !matches!(
            self,
            Self::Coeff(_) | Self::NeighModify | Self::Fix | Self::Unfix | Self::PassThrough
        )
    }
}
