use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use sca_cli::cli::{Cli, Commands};
use sca_cli::config::{load_config, ScaConfig};
use sca_core::{ErrorCategory, ScaError};
use tracing::{debug, error, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod commands;

/// Diagnostics go to stderr so the report stream stays clean.
/// Fatal errors are always shown, even under `RUST_LOG=off`.
fn init_logging(level: Level) {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    if filter.max_level_hint() == Some(LevelFilter::OFF) {
        filter = filter.add_directive(LevelFilter::ERROR.into());
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: &Cli, config: &ScaConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::BusFault(args) => commands::bus_fault::handle(args, config),
        Commands::NoClear(args) => commands::no_clear::handle(args, config),
        Commands::Version => {
            commands::version::handle();
            Ok(())
        }
        Commands::License => {
            commands::version::license();
            Ok(())
        }
        Commands::Completions { shell, out } => {
            commands::completions::handle(*shell, out.as_deref())
        }
    }
}

/// 2 for bad input or configuration, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ScaError>().map(ScaError::category) {
        Some(ErrorCategory::Configuration) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let configured = config.as_ref().ok().and_then(ScaConfig::log_level);
    init_logging(cli.log_level.or(configured).unwrap_or(Level::WARN));
    debug!(?cli, "parsed arguments");

    let result = config
        .map_err(anyhow::Error::from)
        .and_then(|config| run(&cli, &config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            exit_code(&err)
        }
    }
}
