use super::Strictness;
use super::error::{ParseErrorKind, ScriptError};
use super::lexer::LogicalLine;
use crate::core::models::coeff::CoeffDecl;
use crate::core::models::config::{RawCommand, ReadData, RunSpec, SimulationConfig};
use crate::core::models::fix::{DriverArgError, DriverCoupling, FixDecl};
use crate::core::models::params::{Param, TypeRange};
use crate::core::models::styles::{
    AtomStyle, InteractionKind, KSpaceDecl, NeighborBuild, NeighborSettings, StyleDecl, Styles,
};
use crate::core::models::units::UnitSystem;
use crate::core::registry::directives::{self, Directive};
use crate::core::registry::styles::{self as style_registry, Arity};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, trace, warn};

type Outcome = Result<(), ParseErrorKind>;

/// Applies directives in source order, enforcing the ordering rules the
/// engine relies on, and assembles the final [`SimulationConfig`].
pub struct DeckBuilder {
    strictness: Strictness,

    units: Option<UnitSystem>,
    dimension: Option<u8>,
    boundary: Option<Vec<String>>,
    atom_style: Option<AtomStyle>,
    styles: Styles,
    kspace: Option<KSpaceDecl>,
    read_data: Option<ReadData>,
    coefficients: Vec<CoeffDecl>,
    neighbor: Option<NeighborSettings>,
    neigh_modify: Vec<Vec<String>>,
    timestep: Option<f64>,
    thermo: Option<u64>,
    fixes: Vec<FixDecl>,
    commands: Vec<RawCommand>,
    run: Option<RunSpec>,

    // --- Bookkeeping for ordering and duplicate checks ---
    first_seen: HashMap<Directive, usize>,
    active_fixes: HashMap<String, usize>,
}

impl DeckBuilder {
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            units: None,
            dimension: None,
            boundary: None,
            atom_style: None,
            styles: Styles::default(),
            kspace: None,
            read_data: None,
            coefficients: Vec::new(),
            neighbor: None,
            neigh_modify: Vec::new(),
            timestep: None,
            thermo: None,
            fixes: Vec::new(),
            commands: Vec::new(),
            run: None,
            first_seen: HashMap::new(),
            active_fixes: HashMap::new(),
        }
    }

    pub fn apply(&mut self, line: &LogicalLine) -> Result<(), ScriptError> {
        self.dispatch(line)
            .map_err(|kind| ScriptError::parse(line.line, kind))
    }

    fn dispatch(&mut self, line: &LogicalLine) -> Outcome {
        let keyword = line.keyword();
        let args = line.args();

        let Some(directive) = directives::lookup(keyword) else {
            return match self.strictness {
                Strictness::Strict => Err(ParseErrorKind::UnknownDirective {
                    token: keyword.to_string(),
                }),
                Strictness::Lenient => {
                    warn!(
                        line = line.line,
                        "Passing unknown directive '{}' through unchecked.", keyword
                    );
                    self.pass_through(keyword, args);
                    Ok(())
                }
            };
        };

        if directive.is_singleton() {
            if let Some(&first_line) = self.first_seen.get(&directive) {
                return Err(ParseErrorKind::Duplicate {
                    token: keyword.to_string(),
                    first_line,
                });
            }
        }

        match directive {
            Directive::Units => self.units(keyword, args)?,
            Directive::Dimension => self.dimension(keyword, args)?,
            Directive::Boundary => self.boundary(keyword, args)?,
            Directive::AtomStyle => self.atom_style(keyword, args)?,
            Directive::Style(kind) => self.style(kind, keyword, args)?,
            Directive::Coeff(kind) => self.coeff(kind, keyword, args)?,
            Directive::KSpaceStyle => self.kspace_style(keyword, args)?,
            Directive::ReadData => self.read_data(keyword, args)?,
            Directive::Neighbor => self.neighbor(keyword, args)?,
            Directive::NeighModify => {
                expect_at_least(keyword, args, 1)?;
                self.neigh_modify.push(args.to_vec());
            }
            Directive::Timestep => self.timestep(keyword, args)?,
            Directive::Thermo => {
                expect_count(keyword, args, Arity::exactly(1))?;
                self.thermo = Some(parse_u64(&args[0])?);
            }
            Directive::Fix => self.fix(keyword, args, line.line)?,
            Directive::Unfix => self.unfix(keyword, args)?,
            Directive::Run => self.run(keyword, args)?,
            Directive::PassThrough => {
                self.pass_through(keyword, args);
            }
        }

        trace!(line = line.line, keyword, "Applied directive.");
        self.first_seen.entry(directive).or_insert(line.line);
        Ok(())
    }

    pub fn build(self) -> Result<SimulationConfig, ScriptError> {
        let read_data = self
            .read_data
            .ok_or(ScriptError::MissingDirective("read_data"))?;
        let run = self.run.ok_or(ScriptError::MissingDirective("run"))?;

        debug!(
            coefficients = self.coefficients.len(),
            fixes = self.fixes.len(),
            commands = self.commands.len(),
            "Deck assembled."
        );

        Ok(SimulationConfig {
            units: self.units,
            dimension: self.dimension,
            atom_style: self.atom_style,
            timestep: self.timestep,
            thermo: self.thermo,
            boundary: self.boundary,
            neigh_modify: self.neigh_modify,
            read_data,
            styles: self.styles,
            kspace: self.kspace,
            neighbor: self.neighbor,
            coefficients: self.coefficients,
            fixes: self.fixes,
            commands: self.commands,
            run,
        })
    }

    fn pass_through(&mut self, keyword: &str, args: &[String]) {
        let before_box = !self.seen(Directive::ReadData);
        self.commands
            .push(RawCommand::new(keyword, args.to_vec(), before_box));
    }

    fn seen(&self, directive: Directive) -> bool {
        self.first_seen.contains_key(&directive)
    }

    fn require_box(&self, keyword: &str) -> Outcome {
        if self.seen(Directive::ReadData) {
            Ok(())
        } else {
            Err(ParseErrorKind::OutOfOrder {
                token: keyword.to_string(),
                requirement: "requires a preceding read_data".to_string(),
            })
        }
    }

    fn forbid_after_box(&self, keyword: &str) -> Outcome {
        if self.seen(Directive::ReadData) {
            Err(ParseErrorKind::OutOfOrder {
                token: keyword.to_string(),
                requirement: "must precede read_data".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn units(&mut self, keyword: &str, args: &[String]) -> Outcome {
        expect_count(keyword, args, Arity::exactly(1))?;
        self.forbid_after_box(keyword)?;
        if self.seen(Directive::Timestep) || self.seen(Directive::Neighbor) {
            return Err(ParseErrorKind::OutOfOrder {
                token: keyword.to_string(),
                requirement: "must precede timestep and neighbor (it resets both)".to_string(),
            });
        }
        let units = args[0]
            .parse::<UnitSystem>()
            .map_err(|_| invalid_value(&args[0], "unit system"))?;
        self.units = Some(units);
        Ok(())
    }

    fn dimension(&mut self, keyword: &str, args: &[String]) -> Outcome {
        expect_count(keyword, args, Arity::exactly(1))?;
        self.forbid_after_box(keyword)?;
        match args[0].as_str() {
            "2" => self.dimension = Some(2),
            "3" => self.dimension = Some(3),
            other => return Err(invalid_value(other, "dimension (expected 2 or 3)")),
        }
        Ok(())
    }

    fn boundary(&mut self, keyword: &str, args: &[String]) -> Outcome {
        expect_count(keyword, args, Arity::exactly(3))?;
        self.forbid_after_box(keyword)?;
        for flag in args {
            if !is_valid_boundary_flag(flag) {
                return Err(invalid_value(flag, "boundary flag"));
            }
        }
        self.boundary = Some(args.to_vec());
        Ok(())
    }

    fn atom_style(&mut self, keyword: &str, args: &[String]) -> Outcome {
        expect_count(keyword, args, Arity::exactly(1))?;
        self.forbid_after_box(keyword)?;
        let style = args[0]
            .parse::<AtomStyle>()
            .map_err(|_| invalid_value(&args[0], "atom style"))?;
        self.atom_style = Some(style);
        Ok(())
    }

    fn style(&mut self, kind: InteractionKind, keyword: &str, args: &[String]) -> Outcome {
        expect_at_least(keyword, args, 1)?;
        let name = &args[0];
        let params: Vec<Param> = args[1..].iter().map(|t| Param::classify(t)).collect();

        let atom_style = self.atom_style.unwrap_or_default();
        if !atom_style.allows(kind) {
            return Err(ParseErrorKind::Incompatible {
                token: keyword.to_string(),
                reason: format!(
                    "atom style '{}' does not allow {} interactions",
                    atom_style, kind
                ),
            });
        }

        match style_registry::style_rule(kind, name) {
            Some(rule) => {
                if !rule.args.accepts(params.len()) {
                    return Err(ParseErrorKind::ArgumentCount {
                        keyword: keyword.to_string(),
                        style: Some(name.clone()),
                        expected: rule.args,
                        found: params.len(),
                        token: args.last().cloned().unwrap_or_default(),
                    });
                }
                for (param, token) in params.iter().zip(&args[1..]) {
                    if !param.is_numeric() && !rule.keywords.contains(&token.as_str()) {
                        return Err(ParseErrorKind::InvalidFloat {
                            token: token.clone(),
                        });
                    }
                }
            }
            None => warn!(
                "Unknown {} style '{}'; its arguments and coefficients are not checked.",
                kind, name
            ),
        }

        *self.styles.slot_mut(kind) = Some(StyleDecl::new(name.clone(), params));
        Ok(())
    }

    fn coeff(&mut self, kind: InteractionKind, keyword: &str, args: &[String]) -> Outcome {
        self.require_box(keyword)?;
        let Some(style) = self.styles.get(kind) else {
            return Err(ParseErrorKind::OutOfOrder {
                token: keyword.to_string(),
                requirement: format!("requires a preceding {}", kind.style_keyword()),
            });
        };

        let type_count = kind.type_count();
        expect_at_least(keyword, args, type_count)?;
        let types = args[..type_count]
            .iter()
            .map(|t| {
                t.parse::<TypeRange>()
                    .map_err(|_| invalid_value(t, "type selector"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let value_tokens = &args[type_count..];
        let values: Vec<Param> = value_tokens.iter().map(|t| Param::classify(t)).collect();

        if let Some(rule) = style_registry::style_rule(kind, &style.name) {
            if !rule.coeffs.accepts(values.len()) {
                return Err(ParseErrorKind::ArgumentCount {
                    keyword: keyword.to_string(),
                    style: Some(style.name.clone()),
                    expected: rule.coeffs,
                    found: values.len(),
                    token: args.last().cloned().unwrap_or_default(),
                });
            }
            if let Some((_, token)) = values
                .iter()
                .zip(value_tokens)
                .find(|(value, _)| !value.is_numeric())
            {
                return Err(ParseErrorKind::InvalidFloat {
                    token: token.clone(),
                });
            }
        }

        self.coefficients.push(CoeffDecl::new(kind, types, values));
        Ok(())
    }

    fn kspace_style(&mut self, keyword: &str, args: &[String]) -> Outcome {
        expect_at_least(keyword, args, 1)?;
        let name = args[0].clone();
        let rest = &args[1..];

        let decl = match style_registry::kspace_arity(&name) {
            Some(arity) => {
                if !arity.accepts(rest.len()) {
                    return Err(ParseErrorKind::ArgumentCount {
                        keyword: keyword.to_string(),
                        style: Some(name),
                        expected: arity,
                        found: rest.len(),
                        token: args.last().cloned().unwrap_or_default(),
                    });
                }
                let accuracy = rest.first().map(|t| parse_positive(t)).transpose()?;
                let extra = rest.iter().skip(1).map(|t| Param::classify(t)).collect();
                KSpaceDecl {
                    name,
                    accuracy,
                    args: extra,
                }
            }
            None => {
                warn!("Unknown kspace style '{}'; its arguments are not checked.", name);
                KSpaceDecl {
                    name,
                    accuracy: None,
                    args: rest.iter().map(|t| Param::classify(t)).collect(),
                }
            }
        };
        self.kspace = Some(decl);
        Ok(())
    }

    fn read_data(&mut self, keyword: &str, args: &[String]) -> Outcome {
        expect_at_least(keyword, args, 1)?;
        self.read_data = Some(ReadData {
            path: PathBuf::from(&args[0]),
            keywords: args[1..].to_vec(),
        });
        Ok(())
    }

    fn neighbor(&mut self, keyword: &str, args: &[String]) -> Outcome {
        expect_count(keyword, args, Arity::exactly(2))?;
        let skin = parse_f64(&args[0])?;
        if skin < 0.0 {
            return Err(invalid_value(&args[0], "neighbor skin (must not be negative)"));
        }
        let build = args[1]
            .parse::<NeighborBuild>()
            .map_err(|_| invalid_value(&args[1], "neighbor build style"))?;
        self.neighbor = Some(NeighborSettings { skin, build });
        Ok(())
    }

    fn timestep(&mut self, keyword: &str, args: &[String]) -> Outcome {
        expect_count(keyword, args, Arity::exactly(1))?;
        self.timestep = Some(parse_positive(&args[0])?);
        Ok(())
    }

    fn fix(&mut self, keyword: &str, args: &[String], line: usize) -> Outcome {
        self.require_box(keyword)?;
        expect_at_least(keyword, args, 3)?;
        let id = &args[0];
        if let Some(&first_line) = self.active_fixes.get(id) {
            return Err(ParseErrorKind::DuplicateFixId {
                token: id.clone(),
                first_line,
            });
        }

        let fix = FixDecl {
            id: id.clone(),
            group: args[1].clone(),
            style: args[2].clone(),
            args: args[3..].iter().map(|t| Param::classify(t)).collect(),
        };

        if fix.is_driver() {
            let coupling = DriverCoupling::from_args(&fix.args).map_err(|e| match e {
                DriverArgError::MissingArguments => ParseErrorKind::ArgumentCount {
                    keyword: keyword.to_string(),
                    style: Some(fix.style.clone()),
                    expected: Arity::range(2, 4),
                    found: fix.args.len(),
                    token: args.last().cloned().unwrap_or_default(),
                },
                DriverArgError::InvalidPort(token) => {
                    invalid_value(&token, "driver port (expected 1 to 65535)")
                }
                DriverArgError::UnexpectedKeyword(token) => {
                    invalid_value(&token, "driver keyword (expected 'unix' or 'reset')")
                }
            })?;
            debug!(
                fix = %fix.id,
                endpoint = %coupling.endpoint(),
                "Driver coupling declared."
            );
        }

        self.active_fixes.insert(id.clone(), line);
        self.fixes.push(fix);
        Ok(())
    }

    fn unfix(&mut self, keyword: &str, args: &[String]) -> Outcome {
        self.require_box(keyword)?;
        expect_count(keyword, args, Arity::exactly(1))?;
        let id = &args[0];
        if self.active_fixes.remove(id).is_none() {
            return Err(ParseErrorKind::UnknownFixId { token: id.clone() });
        }
        self.fixes.retain(|fix| &fix.id != id);
        Ok(())
    }

    fn run(&mut self, keyword: &str, args: &[String]) -> Outcome {
        self.require_box(keyword)?;
        expect_at_least(keyword, args, 1)?;
        self.run = Some(RunSpec {
            steps: parse_u64(&args[0])?,
            keywords: args[1..].to_vec(),
        });
        Ok(())
    }
}

fn expect_count(keyword: &str, args: &[String], arity: Arity) -> Outcome {
    if arity.accepts(args.len()) {
        return Ok(());
    }
    let token = if args.len() > arity.max {
        args[arity.max].clone()
    } else {
        args.last().cloned().unwrap_or_else(|| keyword.to_string())
    };
    Err(ParseErrorKind::ArgumentCount {
        keyword: keyword.to_string(),
        style: None,
        expected: arity,
        found: args.len(),
        token,
    })
}

fn expect_at_least(keyword: &str, args: &[String], min: usize) -> Outcome {
    if args.len() >= min {
        return Ok(());
    }
    Err(ParseErrorKind::ArgumentCount {
        keyword: keyword.to_string(),
        style: None,
        expected: Arity::range(min, usize::MAX),
        found: args.len(),
        token: args.last().cloned().unwrap_or_else(|| keyword.to_string()),
    })
}

fn invalid_value(token: &str, what: &str) -> ParseErrorKind {
    ParseErrorKind::InvalidValue {
        token: token.to_string(),
        what: what.to_string(),
    }
}

fn parse_f64(token: &str) -> Result<f64, ParseErrorKind> {
    match Param::classify(token).as_f64() {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(ParseErrorKind::InvalidFloat {
            token: token.to_string(),
        }),
    }
}

fn parse_positive(token: &str) -> Result<f64, ParseErrorKind> {
    let value = parse_f64(token)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(invalid_value(token, "value (must be positive)"))
    }
}

fn parse_u64(token: &str) -> Result<u64, ParseErrorKind> {
    token.parse::<u64>().map_err(|_| ParseErrorKind::InvalidInt {
        token: token.to_string(),
    })
}

/// `p` alone, or one or two of `f`, `s`, `m` (lower and upper face).
fn is_valid_boundary_flag(flag: &str) -> bool {
    match flag.len() {
        1 => matches!(flag, "p" | "f" | "s" | "m"),
        2 => flag.chars().all(|c| matches!(c, 'f' | 's' | 'm')),
        _ => false,
    }
}
