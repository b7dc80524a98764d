use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use cable_cli::cli::{Cli, Commands, ConfigCommands, TablesCommands};
use cable_cli::config::{load_config, resolve_config_path, CableConfig};

mod commands;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref())?;
    let config = load_config(&config_path)?;
    init_logging(cli.log_level, &config)?;
    debug!(config = %config_path.display(), "loaded configuration");

    match &cli.command {
        Commands::Rate {
            cable,
            format,
            report,
            out,
        } => commands::rate::handle(cable, *format, *report, out.as_deref(), &config),
        Commands::Sizes { cable, format } => commands::sizes::handle(cable, *format, &config),
        Commands::Tables { command } => match command {
            TablesCommands::Validate { tables } => {
                commands::tables::handle_validate(tables.as_deref(), &config)
            }
            TablesCommands::List { tables } => {
                commands::tables::handle_list(tables.as_deref(), &config)
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => commands::config::handle_init(&config_path, *force),
            ConfigCommands::Show => commands::config::handle_show(&config_path, &config),
        },
        Commands::Completions { shell, out } => {
            commands::completions::handle(*shell, out.as_deref())
        }
    }
}

fn init_logging(flag: Option<Level>, config: &CableConfig) -> Result<()> {
    let level = match flag {
        Some(level) => level,
        None => config.log_level()?,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
