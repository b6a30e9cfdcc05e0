//! Command-line surface of the sca toolkit: argument definitions and user
//! configuration. Command handlers live in the binary.

pub mod cli;
pub mod config;

pub use cli::{build_cli_command, BusFaultArgs, Cli, Commands, NoClearArgs, OutputFormat};
pub use config::{load_config, ScaConfig};
