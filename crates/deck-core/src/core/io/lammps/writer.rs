use crate::core::models::config::{RawCommand, SimulationConfig};
use crate::core::models::params::format_float;
use std::fmt::Display;
use std::io::{self, Write};

const KEYWORD_WIDTH: usize = 15;

/// Writes directives in groups separated by single blank lines.
///
/// Empty groups leave no trace in the output.
struct SectionWriter<'w, W: Write> {
    writer: &'w mut W,
    section_has_lines: bool,
    separator_pending: bool,
}

impl<'w, W: Write> SectionWriter<'w, W> {
    fn new(writer: &'w mut W) -> Self {
        Self {
            writer,
            section_has_lines: false,
            separator_pending: false,
        }
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        if self.separator_pending {
            writeln!(self.writer)?;
            self.separator_pending = false;
        }
        self.section_has_lines = true;
        writeln!(self.writer, "{}", text)
    }

    fn directive<I>(&mut self, keyword: &str, args: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.to_string()).collect();
        if args.is_empty() {
            self.line(keyword)
        } else {
            self.line(&format!(
                "{:<width$} {}",
                keyword,
                args.join(" "),
                width = KEYWORD_WIDTH
            ))
        }
    }

    fn commands<'c>(&mut self, commands: impl Iterator<Item = &'c RawCommand>) -> io::Result<()> {
        for command in commands {
            self.directive(&command.keyword, &command.args)?;
        }
        Ok(())
    }

    fn end_section(&mut self) {
        if self.section_has_lines {
            self.separator_pending = true;
            self.section_has_lines = false;
        }
    }
}

/// Writes the deck in canonical section order.
///
/// Pass-through commands keep their relative order. Those that appeared
/// before `read_data` are written right before it; the rest follow the
/// coefficients, where the simulation box and all styles already exist.
pub fn write_config(config: &SimulationConfig, writer: &mut impl Write) -> io::Result<()> {
    let mut out = SectionWriter::new(writer);
    out.line("# Generated by lmpdeck")?;
    out.end_section();

    if let Some(units) = config.units {
        out.directive("units", [units])?;
    }
    if let Some(dimension) = config.dimension {
        out.directive("dimension", [dimension])?;
    }
    if let Some(boundary) = &config.boundary {
        out.directive("boundary", boundary)?;
    }
    if let Some(atom_style) = config.atom_style {
        out.directive("atom_style", [atom_style])?;
    }
    out.end_section();

    for (kind, style) in config.styles.iter() {
        let args = std::iter::once(style.name.clone()).chain(style.args.iter().map(|p| p.to_string()));
        out.directive(kind.style_keyword(), args)?;
    }
    if let Some(kspace) = &config.kspace {
        let args = std::iter::once(kspace.name.clone())
            .chain(kspace.accuracy.map(format_float))
            .chain(kspace.args.iter().map(|p| p.to_string()));
        out.directive("kspace_style", args)?;
    }
    out.end_section();

    out.commands(config.commands.iter().filter(|c| c.before_box))?;
    let read_data = &config.read_data;
    let args = std::iter::once(read_data.path.display().to_string())
        .chain(read_data.keywords.iter().cloned());
    out.directive("read_data", args)?;
    for coeff in &config.coefficients {
        let args = coeff
            .types
            .iter()
            .map(|t| t.to_string())
            .chain(coeff.values.iter().map(|v| v.to_string()));
        out.directive(coeff.kind.coeff_keyword(), args)?;
    }
    out.end_section();

    out.commands(config.commands.iter().filter(|c| !c.before_box))?;
    out.end_section();

    if let Some(neighbor) = config.neighbor {
        out.directive(
            "neighbor",
            [format_float(neighbor.skin), neighbor.build.to_string()],
        )?;
    }
    for args in &config.neigh_modify {
        out.directive("neigh_modify", args)?;
    }
    if let Some(timestep) = config.timestep {
        out.directive("timestep", [format_float(timestep)])?;
    }
    if let Some(thermo) = config.thermo {
        out.directive("thermo", [thermo])?;
    }
    out.end_section();

    for fix in &config.fixes {
        let args = [fix.id.clone(), fix.group.clone(), fix.style.clone()]
            .into_iter()
            .chain(fix.args.iter().map(|p| p.to_string()));
        out.directive("fix", args)?;
    }
    out.end_section();

    let args = std::iter::once(config.run.steps.to_string()).chain(config.run.keywords.iter().cloned());
    out.directive("run", args)
}
