//! LAMMPS-style input scripts.
//!
//! A script is read in three steps: the [`lexer`] turns the text into logical
//! lines, the [`interpreter`] applies each directive in order while enforcing
//! the ordering rules, and the finished [`SimulationConfig`] is assembled once
//! the whole script has been seen. Writing goes the other way and always emits
//! directives in one canonical order, so a written deck reads back unchanged.

pub mod error;
pub mod interpreter;
pub mod lexer;
mod writer;

use self::error::ScriptError;
use self::interpreter::DeckBuilder;
use self::lexer::read_logical_lines;
use crate::core::io::traits::DeckFile;
use crate::core::models::config::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// How the reader treats directives it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Unknown directives abort loading.
    #[default]
    Strict,
    /// Unknown directives are kept as opaque commands and logged.
    Lenient,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown strictness '{0}' (expected 'strict' or 'lenient')")]
pub struct ParseStrictnessError(pub String);

impl FromStr for Strictness {
    type Err = ParseStrictnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(ParseStrictnessError(other.to_string())),
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        })
    }
}

/// Reader and writer for LAMMPS input scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LammpsScript {
    strictness: Strictness,
}

impl LammpsScript {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    pub fn strict() -> Self {
        Self::new(Strictness::Strict)
    }

    pub fn lenient() -> Self {
        Self::new(Strictness::Lenient)
    }
}

impl DeckFile for LammpsScript {
    type Error = ScriptError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<SimulationConfig, Self::Error> {
        let lines = read_logical_lines(reader)?;
        debug!(
            lines = lines.len(),
            strictness = %self.strictness,
            "Interpreting script."
        );

        let mut builder = DeckBuilder::new(self.strictness);
        for line in &lines {
            builder.apply(line)?;
        }
        builder.build()
    }

    fn write_to(
        &self,
        config: &SimulationConfig,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writer::write_config(config, writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::error::ParseErrorKind;
    use super::*;
    use crate::core::models::fix::{SocketEndpoint, SocketMode};
    use crate::core::models::params::{Param, TypeRange};
    use crate::core::models::styles::{AtomStyle, InteractionKind, NeighborBuild};
    use crate::core::models::units::UnitSystem;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const ICE_DECK: &str = r#"
units		electron
atom_style	full

pair_style      lj/cut/tip4p/long 1 2 1 1 0.278072379 17.007
bond_style      class2
angle_style     harmonic
kspace_style	pppm/tip4p 0.0001

read_data	data.lmp
pair_coeff  * * 0 0
pair_coeff  1  1  0.000295147 5.96946

bond_coeff  1 1.78 0.2708585 -0.327738785 0.231328959
angle_coeff 1 0.0700 107.4005

neighbor	2.0 bin

timestep	0.00025

#velocity all create 298.0 2345187

#thermo_style	multi
#thermo		1

#fix		1 all nvt temp 298.0 30.0 0.1
fix 1 all driver lammps_ice 32345 unix

#dump		1 all xyz 25 dump.xyz

run		100000000
"#;

    fn parse(text: &str) -> Result<SimulationConfig, ScriptError> {
        LammpsScript::strict().read_from_str(text)
    }

    fn parse_err(text: &str) -> (usize, ParseErrorKind) {
        match parse(text).unwrap_err() {
            ScriptError::Parse { line, kind } => (line, kind),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn ice_deck_values_match_the_source_tokens() {
        let config = parse(ICE_DECK).unwrap();

        assert_eq!(config.units, Some(UnitSystem::Electron));
        assert_eq!(config.atom_style, Some(AtomStyle::Full));
        assert_eq!(config.timestep, Some(0.00025));
        assert_eq!(config.read_data.path, PathBuf::from("data.lmp"));
        assert_eq!(config.run.steps, 100_000_000);

        let pair = config.styles.pair.as_ref().unwrap();
        assert_eq!(pair.name, "lj/cut/tip4p/long");
        assert_eq!(
            pair.args,
            vec![
                Param::Int(1),
                Param::Int(2),
                Param::Int(1),
                Param::Int(1),
                Param::Float(0.278072379),
                Param::Float(17.007),
            ]
        );
        assert_eq!(config.styles.bond.as_ref().unwrap().name, "class2");
        assert_eq!(config.styles.angle.as_ref().unwrap().name, "harmonic");

        let kspace = config.kspace.as_ref().unwrap();
        assert_eq!(kspace.name, "pppm/tip4p");
        assert_eq!(kspace.accuracy, Some(0.0001));

        let neighbor = config.neighbor.unwrap();
        assert_eq!(neighbor.skin, 2.0);
        assert_eq!(neighbor.build, NeighborBuild::Bin);
    }

    #[test]
    fn ice_deck_coefficients_keep_source_order() {
        let config = parse(ICE_DECK).unwrap();
        assert_eq!(config.coefficients.len(), 4);

        let pairs: Vec<_> = config.coefficients_of(InteractionKind::Pair).collect();
        assert_eq!(pairs[0].types, vec![TypeRange::All, TypeRange::All]);
        assert_eq!(pairs[0].values, vec![Param::Int(0), Param::Int(0)]);
        assert_eq!(pairs[1].types, vec![TypeRange::Single(1), TypeRange::Single(1)]);
        assert_eq!(
            pairs[1].values,
            vec![Param::Float(0.000295147), Param::Float(5.96946)]
        );

        let bond = config.coefficients_of(InteractionKind::Bond).next().unwrap();
        assert_eq!(
            bond.values,
            vec![
                Param::Float(1.78),
                Param::Float(0.2708585),
                Param::Float(-0.327738785),
                Param::Float(0.231328959),
            ]
        );

        let angle = config.coefficients_of(InteractionKind::Angle).next().unwrap();
        assert_eq!(angle.values, vec![Param::Float(0.07), Param::Float(107.4005)]);
    }

    #[test]
    fn ice_deck_driver_fix_couples_over_a_unix_socket() {
        let config = parse(ICE_DECK).unwrap();
        assert_eq!(config.fixes.len(), 1);

        let (fix, coupling) = config.driver_couplings().next().unwrap();
        assert_eq!(fix.id, "1");
        assert_eq!(fix.group, "all");
        let coupling = coupling.unwrap();
        assert_eq!(coupling.mode, SocketMode::Unix);
        assert_eq!(coupling.port, 32345);
        assert_eq!(
            coupling.endpoint(),
            SocketEndpoint::Unix(PathBuf::from("/tmp/ipi_lammps_ice"))
        );
    }

    #[test]
    fn commented_directives_are_ignored() {
        let config = parse(ICE_DECK).unwrap();
        assert!(config.commands.is_empty());
        assert_eq!(config.thermo, None);
        assert!(config.fix("1").is_some_and(|f| f.is_driver()));
    }

    #[test]
    fn comments_and_blank_lines_never_change_the_result() {
        let bare = "units real\nread_data data.lmp\nrun 10\n";
        let noisy = "# a deck\n\nunits real # comment\n\n\n# read_data other.lmp\nread_data data.lmp\n   \nrun 10 # done\n";
        assert_eq!(parse(bare).unwrap(), parse(noisy).unwrap());
    }

    #[test]
    fn missing_pair_coefficient_is_reported_on_its_line() {
        let deck = ICE_DECK.replace(
            "pair_coeff  1  1  0.000295147 5.96946",
            "pair_coeff  1  1  0.000295147",
        );
        let (line, kind) = parse_err(&deck);
        let expected_line = deck
            .lines()
            .position(|l| l.trim_end() == "pair_coeff  1  1  0.000295147")
            .unwrap()
            + 1;
        assert_eq!(line, expected_line);
        match kind {
            ParseErrorKind::ArgumentCount {
                keyword,
                found,
                token,
                ..
            } => {
                assert_eq!(keyword, "pair_coeff");
                assert_eq!(found, 1);
                assert_eq!(token, "0.000295147");
            }
            other => panic!("unexpected error kind {other:?}"),
        }
    }

    #[test]
    fn non_numeric_coefficient_is_rejected_with_the_token() {
        let (line, kind) = parse_err(
            "atom_style full\nbond_style harmonic\nread_data d\nbond_coeff 1 450.0 1.0x\nrun 1\n",
        );
        assert_eq!(line, 4);
        assert_eq!(kind, ParseErrorKind::InvalidFloat { token: "1.0x".into() });
    }

    #[test]
    fn malformed_timestep_is_rejected() {
        let (line, kind) = parse_err("units real\ntimestep 0.0.1\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert_eq!(kind.token(), "0.0.1");
    }

    #[test]
    fn unknown_directive_fails_in_strict_mode() {
        let (line, kind) = parse_err("units lj\nfrobnicate 1 2\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert_eq!(
            kind,
            ParseErrorKind::UnknownDirective {
                token: "frobnicate".into()
            }
        );
    }

    #[test]
    fn unknown_directive_passes_through_in_lenient_mode() {
        let config = LammpsScript::lenient()
            .read_from_str("units lj\nread_data d\nfrobnicate 1 2\nrun 1\n")
            .unwrap();
        assert_eq!(config.commands.len(), 1);
        assert_eq!(config.commands[0].keyword, "frobnicate");
        assert_eq!(config.commands[0].args, vec!["1", "2"]);
    }

    #[test]
    fn recognized_pass_through_commands_are_kept_in_both_modes() {
        let deck = "units lj\nread_data d\nvelocity all create 1.0 4928459\nthermo_style multi\nrun 1\n";
        for script in [LammpsScript::strict(), LammpsScript::lenient()] {
            let config = script.read_from_str(deck).unwrap();
            let keywords: Vec<_> = config.commands.iter().map(|c| c.keyword.as_str()).collect();
            assert_eq!(keywords, vec!["velocity", "thermo_style"]);
        }
    }

    #[test]
    fn coefficient_before_its_style_is_out_of_order() {
        let (line, kind) = parse_err("read_data d\npair_coeff * * 1.0 1.0\nrun 1\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::OutOfOrder { .. }));
    }

    #[test]
    fn coefficient_before_read_data_is_out_of_order() {
        let (line, kind) = parse_err("pair_style lj/cut 2.5\npair_coeff * * 1.0 1.0\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert_eq!(kind.token(), "pair_coeff");
    }

    #[test]
    fn units_after_read_data_is_out_of_order() {
        let (line, kind) = parse_err("read_data d\nunits real\nrun 1\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::OutOfOrder { .. }));
    }

    #[test]
    fn units_after_timestep_is_out_of_order() {
        let (line, _) = parse_err("timestep 1.0\nunits real\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
    }

    #[test]
    fn bond_style_requires_a_molecular_atom_style() {
        let (line, kind) = parse_err("atom_style atomic\nbond_style harmonic\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::Incompatible { .. }));
    }

    #[test]
    fn duplicate_singleton_names_the_first_line() {
        let (line, kind) = parse_err("units real\n\nunits metal\nread_data d\nrun 1\n");
        assert_eq!(line, 3);
        assert_eq!(
            kind,
            ParseErrorKind::Duplicate {
                token: "units".into(),
                first_line: 1
            }
        );
    }

    #[test]
    fn fix_ids_cannot_be_reused_while_active() {
        let (line, kind) = parse_err("read_data d\nfix 1 all nve\nfix 1 all nvt temp 1 1 1\nrun 1\n");
        assert_eq!(line, 3);
        assert_eq!(
            kind,
            ParseErrorKind::DuplicateFixId {
                token: "1".into(),
                first_line: 2
            }
        );
    }

    #[test]
    fn unfix_removes_the_fix_and_frees_its_id() {
        let config =
            parse("read_data d\nfix 1 all nve\nunfix 1\nfix 1 all langevin 1.0 1.0 0.1 48279\nrun 1\n")
                .unwrap();
        assert_eq!(config.fixes.len(), 1);
        assert_eq!(config.fixes[0].style, "langevin");
    }

    #[test]
    fn unfix_of_unknown_id_is_an_error() {
        let (line, kind) = parse_err("read_data d\nunfix 9\nrun 1\n");
        assert_eq!(line, 2);
        assert_eq!(kind, ParseErrorKind::UnknownFixId { token: "9".into() });
    }

    #[test]
    fn invalid_driver_port_is_rejected_while_reading() {
        let (line, kind) = parse_err("read_data d\nfix 1 all driver host 99999\nrun 1\n");
        assert_eq!(line, 2);
        assert_eq!(kind.token(), "99999");
    }

    #[test]
    fn missing_run_and_read_data_are_reported() {
        assert!(matches!(
            parse("units lj\nread_data d\n").unwrap_err(),
            ScriptError::MissingDirective("run")
        ));
        assert!(matches!(
            parse("units lj\n").unwrap_err(),
            ScriptError::MissingDirective("read_data")
        ));
    }

    #[test]
    fn kspace_requires_a_positive_accuracy() {
        let (line, kind) = parse_err("kspace_style pppm -1e-4\nread_data d\nrun 1\n");
        assert_eq!(line, 1);
        assert_eq!(kind.token(), "-1e-4");
    }

    #[test]
    fn unknown_styles_are_accepted_without_coefficient_checks() {
        let config = parse("pair_style table linear 1000\nread_data d\npair_coeff 1 1 table.txt KEY\nrun 1\n").unwrap();
        assert_eq!(config.styles.pair.as_ref().unwrap().name, "table");
        assert_eq!(config.coefficients[0].values.len(), 2);
    }

    #[test]
    fn writing_then_reading_yields_the_same_config() {
        let script = LammpsScript::strict();
        let original = parse(ICE_DECK).unwrap();
        let text = script.write_to_string(&original).unwrap();
        let reparsed = script.read_from_str(&text).unwrap();
        assert_eq!(original, reparsed);
        assert_eq!(script.write_to_string(&reparsed).unwrap(), text);
    }

    #[test]
    fn written_deck_uses_canonical_order() {
        let deck = "read_data d\nvelocity all create 1.0 1\nfix 1 all nve\nthermo 100\nrun 5\n";
        let text = LammpsScript::strict()
            .write_to_string(&parse(deck).unwrap())
            .unwrap();
        let keywords: Vec<_> = text
            .lines()
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(keywords, vec!["read_data", "velocity", "thermo", "fix", "run"]);
    }

    #[test]
    fn integral_floats_stay_floats_after_writing() {
        let script = LammpsScript::strict();
        let config = parse("units real\nneighbor 2.0 bin\ntimestep 1.0\nread_data d\nrun 1\n").unwrap();
        let text = script.write_to_string(&config).unwrap();
        assert!(text.contains("2.0 bin"));
        assert_eq!(script.read_from_str(&text).unwrap(), config);
    }

    #[test]
    fn read_and_write_through_files() {
        let script = LammpsScript::strict();
        let mut input = NamedTempFile::new().unwrap();
        input.write_all(ICE_DECK.as_bytes()).unwrap();

        let config = script.read_from_path(input.path()).unwrap();
        let output = NamedTempFile::new().unwrap();
        script.write_to_path(&config, output.path()).unwrap();
        assert_eq!(script.read_from_path(output.path()).unwrap(), config);
    }

    #[test]
    fn invalid_boundary_flag_is_rejected_with_the_token() {
        let (line, kind) = parse_err("units lj\nboundary p x p\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::InvalidValue { .. }));
        assert_eq!(kind.token(), "x");

        let (_, kind) = parse_err("boundary p pf p\nread_data d\nrun 1\n");
        assert_eq!(kind.token(), "pf");

        let config = parse("boundary p fs m\nread_data d\nrun 1\n").unwrap();
        assert_eq!(config.boundary, Some(vec!["p".into(), "fs".into(), "m".into()]));
    }

    #[test]
    fn dimension_must_be_two_or_three() {
        let (line, kind) = parse_err("units lj\ndimension 4\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::InvalidValue { .. }));
        assert_eq!(kind.token(), "4");
    }

    #[test]
    fn negative_neighbor_skin_is_rejected() {
        let (line, kind) = parse_err("units real\nneighbor -1.0 bin\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::InvalidValue { .. }));
        assert_eq!(kind.token(), "-1.0");
    }

    #[test]
    fn units_after_neighbor_is_out_of_order() {
        let (line, kind) = parse_err("neighbor 2.0 bin\nunits real\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::OutOfOrder { .. }));
        assert_eq!(kind.token(), "units");
    }

    #[test]
    fn fix_before_read_data_is_out_of_order() {
        let (line, kind) = parse_err("units lj\nfix 1 all nve\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::OutOfOrder { .. }));
        assert_eq!(kind.token(), "fix");
    }

    #[test]
    fn run_before_read_data_is_out_of_order() {
        let (line, kind) = parse_err("units lj\nrun 1\nread_data d\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::OutOfOrder { .. }));
        assert_eq!(kind.token(), "run");
    }

    #[test]
    fn style_arguments_must_be_numeric_unless_a_known_keyword() {
        let (line, kind) = parse_err("units lj\npair_style lj/cut far\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert_eq!(kind, ParseErrorKind::InvalidFloat { token: "far".into() });

        let config = parse("pair_style zero 10.0 nocoeff\nread_data d\nrun 1\n").unwrap();
        assert_eq!(
            config.styles.pair.unwrap().args,
            vec![Param::Float(10.0), Param::Word("nocoeff".into())]
        );
    }

    #[test]
    fn unknown_kspace_style_keeps_its_arguments_unchecked() {
        let config = parse("kspace_style scafacos fmm 0.001\nread_data d\nrun 1\n").unwrap();
        let kspace = config.kspace.unwrap();
        assert_eq!(kspace.name, "scafacos");
        assert_eq!(kspace.accuracy, None);
        assert_eq!(kspace.args, vec![Param::Word("fmm".into()), Param::Float(0.001)]);
    }

    #[test]
    fn pppm_cg_takes_an_optional_charge_threshold() {
        let config = parse("kspace_style pppm/cg 1e-4 1e-5\nread_data d\nrun 1\n").unwrap();
        let kspace = config.kspace.unwrap();
        assert_eq!(kspace.accuracy, Some(1e-4));
        assert_eq!(kspace.args, vec![Param::Float(1e-5)]);

        let (line, kind) = parse_err("units lj\nkspace_style pppm/cg 1e-4 1e-5 2\nread_data d\nrun 1\n");
        assert_eq!(line, 2);
        assert!(matches!(kind, ParseErrorKind::ArgumentCount { found: 3, .. }));
        assert_eq!(kind.token(), "2");
    }

    #[test]
    fn non_finite_coefficients_are_rejected() {
        let (line, kind) = parse_err(
            "pair_style lj/cut 2.5\nread_data d\npair_coeff 1 1 -nan +inf\nrun 1\n",
        );
        assert_eq!(line, 3);
        assert_eq!(kind, ParseErrorKind::InvalidFloat { token: "-nan".into() });
    }

    #[test]
    fn non_finite_fix_arguments_round_trip_as_words() {
        let script = LammpsScript::strict();
        let config = parse("read_data d\nfix 1 all nve -nan +inf\nrun 1\n").unwrap();
        assert_eq!(
            config.fixes[0].args,
            vec![Param::Word("-nan".into()), Param::Word("+inf".into())]
        );
        let text = script.write_to_string(&config).unwrap();
        assert_eq!(script.read_from_str(&text).unwrap(), config);
    }

    #[test]
    fn setup_commands_stay_ahead_of_read_data() {
        let script = LammpsScript::strict();
        let config = parse(
            "atom_modify map array\nprocessors * * 1\nread_data d\nvelocity all create 1.0 1\nrun 1\n",
        )
        .unwrap();
        assert!(config.commands[0].before_box);
        assert!(config.commands[1].before_box);
        assert!(!config.commands[2].before_box);

        let text = script.write_to_string(&config).unwrap();
        let keywords: Vec<_> = text
            .lines()
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(
            keywords,
            vec!["atom_modify", "processors", "read_data", "velocity", "run"]
        );
        assert_eq!(script.read_from_str(&text).unwrap(), config);
    }

    #[test]
    fn sparse_deck_has_single_blank_separators() {
        let text = LammpsScript::strict()
            .write_to_string(&parse("read_data d\nrun 1\n").unwrap())
            .unwrap();
        assert_eq!(
            text,
            "# Generated by lmpdeck\n\nread_data       d\n\nrun             1\n"
        );

        let text = LammpsScript::strict()
            .write_to_string(&parse(ICE_DECK).unwrap())
            .unwrap();
        assert!(!text.contains("\n\n\n"));
        assert!(text.ends_with("unix\n\nrun             100000000\n"));
    }

    #[test]
    fn strictness_parses_and_displays() {
        assert_eq!("lenient".parse::<Strictness>(), Ok(Strictness::Lenient));
        assert_eq!(Strictness::Strict.to_string(), "strict");
        assert!("loose".parse::<Strictness>().is_err());
        assert_eq!(Strictness::default(), Strictness::Strict);
    }
}
