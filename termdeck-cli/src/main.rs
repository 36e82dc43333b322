//! `termdeck` CLI - command-line driver for the `termdeck` layout core
//!
//! Replays scripted workspace commands against an in-memory session
//! backend, lists keybindings and shows the effective configuration.

mod cli;
mod commands;
mod error;
mod format;
mod util;

use clap::Parser;
use cli::Cli;
use termdeck_core::tracing::{TracingConfig, TracingLevel, init_tracing};

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let settings = match util::load_settings(config_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    let tracing_config = log_config(&settings.logging.tracing_config(), cli.verbose, cli.quiet);
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let result = commands::dispatch(config_path, &settings, cli.command, cli.quiet);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

/// Applies command-line verbosity on top of the configured logging.
///
/// `-v` flags replace the configured level and filter; `--quiet` limits
/// logging to errors. The configured output is always kept.
fn log_config(configured: &TracingConfig, verbose: u8, quiet: bool) -> TracingConfig {
    let level = if quiet {
        TracingLevel::Error
    } else if verbose > 0 {
        TracingLevel::from_verbosity(verbose)
    } else {
        return configured.clone();
    };
    configured.clone().with_level(level).without_filter()
}
