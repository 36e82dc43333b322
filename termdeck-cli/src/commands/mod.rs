//! Command handler modules for the CLI.

mod completions;
mod config;
mod keys;
mod run;

use std::path::Path;

use termdeck_core::config::AppSettings;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(
    config_path: Option<&Path>,
    settings: &AppSettings,
    command: Commands,
    quiet: bool,
) -> Result<(), CliError> {
    match command {
        Commands::Run {
            script,
            format,
            fail_creates,
        } => run::cmd_run(settings, &script, format, fail_creates, quiet),
        Commands::Keys => keys::cmd_keys(&settings.keybindings),
        Commands::Config { defaults } => config::cmd_config(config_path, settings, defaults),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
