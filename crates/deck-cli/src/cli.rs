use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "lmpdeck developers",
    version,
    about = "lmpdeck - Load, validate and rewrite LAMMPS input decks for driver-coupled simulations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to check decks in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate one or more input decks and report the result for each.
    Check(CheckArgs),
    /// Print a loaded deck as a summary, a TOML document or a canonical script.
    Show(ShowArgs),
    /// Rewrite a deck in canonical directive order.
    Format(FormatArgs),
    /// Turn a TOML deck description into a LAMMPS input script.
    Render(RenderArgs),
}

/// How `show` prints a deck.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Summary,
    Toml,
    Script,
}

/// Options shared by every command that loads a deck.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Path to a settings file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override `parser.strictness` from the settings file.
    #[command(flatten)]
    pub strictness: StrictnessFlags,

    /// Skip the whole-deck consistency checks.
    #[arg(long)]
    pub no_checks: bool,

    /// Set a specific configuration value, overriding the settings file.
    /// Can be used multiple times. Example: -S parser.strictness=lenient
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// A group to handle the mutually exclusive strictness flags.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct StrictnessFlags {
    /// Reject unknown directives.
    #[arg(long)]
    pub strict: bool,
    /// Keep unknown directives as opaque commands.
    #[arg(long)]
    pub lenient: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input decks to validate.
    #[arg(required = true, value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub load: LoadArgs,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Input deck to show.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Output format, overriding `output.format` from the settings file.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub load: LoadArgs,
}

/// Arguments for the `format` subcommand.
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Input deck to rewrite.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Write the result here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub load: LoadArgs,
}

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// TOML deck description.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Write the script here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub load: LoadArgs,
}
