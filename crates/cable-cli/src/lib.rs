pub mod cli;
pub mod common;
pub mod config;
pub mod inputs;
pub mod report;

pub use cli::{build_cli_command, CableArgs, Cli, Commands, ConfigCommands, TablesCommands};
