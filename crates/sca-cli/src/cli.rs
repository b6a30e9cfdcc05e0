use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use sca_algo::FilterSpec;
use sca_io::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sca-cli", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Configuration file [default: ~/.sca/config.toml]
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply close-in faults at every selected bus and report voltages and currents
    #[command(name = "busfault", visible_alias = "bf")]
    BusFault(BusFaultArgs),
    /// Run stepped events at selected buses and report faults that clear slowly or not at all
    #[command(name = "noclear", visible_alias = "nc")]
    NoClear(NoClearArgs),
    /// Display the application version
    #[command(visible_alias = "v")]
    Version,
    /// Display the license information
    #[command(visible_alias = "l")]
    License,
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Report format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space-aligned columns
    #[default]
    Table,
    /// Comma-separated values
    Csv,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => ReportFormat::Table,
            OutputFormat::Csv => ReportFormat::Csv,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CaseArgs {
    /// Input case file
    #[arg(short = 'f', long = "file", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

/// Bus selection. Every criterion must hold for a bus to be studied.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Regular expression matched against bus names
    #[arg(short = 'e', long = "expression")]
    pub expression: Option<String>,

    /// Minimum nominal bus voltage (kV)
    #[arg(long, default_value_t = 0.0)]
    pub vmin: f64,

    /// Maximum nominal bus voltage (kV)
    #[arg(long, default_value_t = 999.0)]
    pub vmax: f64,

    /// Area number (0 = any)
    #[arg(short = 'a', long, default_value_t = 0)]
    pub area: u32,

    /// Zone number (0 = any)
    #[arg(short = 'z', long, default_value_t = 0)]
    pub zone: u32,
}

impl FilterArgs {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            expression: self.expression.clone(),
            v_min: self.vmin,
            v_max: self.vmax,
            area: self.area,
            zone: self.zone,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ImpedanceArgs {
    /// Fault resistance (ohms)
    #[arg(short = 'r', long, default_value_t = 0.0)]
    pub resistance: f64,

    /// Fault reactance (ohms)
    #[arg(short = 'x', long, default_value_t = 0.0)]
    pub reactance: f64,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Write the report to a file instead of stdout (a .csv extension selects CSV)
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Report format [default: table]
    #[arg(short = 'F', long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug, Clone)]
pub struct BusFaultArgs {
    #[command(flatten)]
    pub case: CaseArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub impedance: ImpedanceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Fault connection code, e.g. ABC, AG, BCG (repeatable)
    #[arg(short = 'c', long = "conn", value_delimiter = ',')]
    pub conn: Vec<String>,

    /// Report sequence components instead of phase quantities
    #[arg(short = 's', long = "seq")]
    pub seq: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NoClearArgs {
    #[command(flatten)]
    pub case: CaseArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub impedance: ImpedanceArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Fault connection code (repeatable) [default: ABC, AG]
    #[arg(short = 'c', long = "conn", value_delimiter = ',')]
    pub conn: Vec<String>,

    /// Also run stepped events at the branches attached to each bus
    #[arg(short = 'b', long)]
    pub branches: bool,

    /// Report every run, including those that cleared in time
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Current at or below which the fault counts as cleared (A) [default: 1.0]
    #[arg(long)]
    pub cleared_threshold: Option<f64>,

    /// Clearing time at or above which clearing is slow (s) [default: 3.0]
    #[arg(long)]
    pub slow_threshold: Option<f64>,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
