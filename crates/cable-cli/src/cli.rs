use cable_core::{AirInstallationMethod, Arrangement, Construction, Installation, Material};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::common::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "cable-cli",
    author,
    version,
    about = "Cable current rating, derating and sizing checks",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level (default: from config, else info)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Configuration file (default: ~/.cable-rating/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rate a cable: base rating, derating, sizing, short-circuit, voltage drop and losses
    Rate {
        #[command(flatten)]
        cable: CableArgs,
        /// Output format (default: from config, else table)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Print the full calculation report instead of the summary
        #[arg(long, conflicts_with = "format")]
        report: bool,
        /// Write output to a file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Rate every listed conductor size under the same conditions
    Sizes {
        #[command(flatten)]
        cable: CableArgs,
        /// Output format (default: from config, else table)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Inspect rating tables
    Tables {
        #[command(subcommand)]
        command: TablesCommands,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
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

#[derive(Subcommand, Debug)]
pub enum TablesCommands {
    /// Check table data for gaps and inconsistencies
    Validate {
        /// Table file (default: from config, else bundled tables)
        #[arg(long, value_hint = ValueHint::FilePath)]
        tables: Option<PathBuf>,
    },
    /// List cable types, voltage classes, installations and sizes
    List {
        /// Table file (default: from config, else bundled tables)
        #[arg(long, value_hint = ValueHint::FilePath)]
        tables: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// Cable specification and conditions. Flags override values from
/// `--params`; anything left unset takes its default.
#[derive(Args, Debug, Clone, Default)]
pub struct CableArgs {
    /// Parameter file (.toml or .json, camelCase keys)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub params: Option<PathBuf>,

    /// Table file (default: from config, else bundled tables)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub tables: Option<PathBuf>,

    /// Conductor material: copper, aluminum
    #[arg(long)]
    pub material: Option<Material>,

    /// Construction: singleCore, threeCore
    #[arg(long)]
    pub construction: Option<Construction>,

    /// Voltage class as listed in the tables, e.g. 0.6/1kV
    #[arg(long)]
    pub voltage: Option<String>,

    /// Conductor cross-section (mm²)
    #[arg(long)]
    pub size: Option<f64>,

    /// Installation: inAir, buriedDirect, inDucts
    #[arg(long)]
    pub installation: Option<Installation>,

    /// Single-core arrangement: trefoil, flatTouching
    #[arg(long)]
    pub arrangement: Option<Arrangement>,

    /// Ambient temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub ambient_temp: Option<f64>,

    /// Depth of laying (mm)
    #[arg(long)]
    pub depth: Option<f64>,

    /// Soil thermal resistivity (K·m/W)
    #[arg(long)]
    pub soil_resistivity: Option<f64>,

    /// Number of circuits
    #[arg(long)]
    pub circuits: Option<u32>,

    /// Required current, total across circuits (A)
    #[arg(long)]
    pub required_current: Option<f64>,

    /// Cable run length (m)
    #[arg(long)]
    pub length: Option<f64>,

    /// Supply voltage (V)
    #[arg(long)]
    pub supply_voltage: Option<f64>,

    /// Maximum voltage drop (%)
    #[arg(long)]
    pub max_drop: Option<f64>,

    /// Prospective short-circuit current (kA)
    #[arg(long)]
    pub sc_current: Option<f64>,

    /// Fault duration (s)
    #[arg(long)]
    pub fault_duration: Option<f64>,

    /// Support system in air: perforatedTrays, ladderSupports, verticalTrays
    #[arg(long)]
    pub air_method: Option<AirInstallationMethod>,

    /// Cable spacing, free text for the report
    #[arg(long)]
    pub spacing: Option<String>,

    /// Number of trays or ladders
    #[arg(long)]
    pub trays: Option<u32>,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
