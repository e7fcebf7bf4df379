//! Kiln - idempotent SDK installs and rebuild checks
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use kiln::cli::{Cli, Commands};
use kiln::config::{Config, ConfigManager};
use kiln::error::KilnResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> KilnResult<ExitCode> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load()?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    match cli.command {
        Commands::Install(args) => kiln::cli::commands::install(args, &config)?,
        Commands::Cache(args) => kiln::cli::commands::cache(args, &config)?,
        Commands::Build(args) => return kiln::cli::commands::build(args, &config),
        Commands::Hash(args) => kiln::cli::commands::hash(args, &config)?,
        Commands::Resolve(args) => kiln::cli::commands::resolve(args, &config)?,
        Commands::Config(args) => kiln::cli::commands::config(args, &config_manager, &config)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// 0 = warn, 1 = info, 2+ = debug. `RUST_LOG` applies when no `-v` is given.
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kiln=warn")),
        1 => EnvFilter::new("kiln=info"),
        _ => EnvFilter::new("kiln=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
