//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// `termdeck` command-line interface for replaying layout scripts
#[derive(Parser)]
#[command(name = "termdeck")]
#[command(author, version, about = "termdeck layout and session driver")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "TERMDECK_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Replay a command script and print the resulting layout
    #[command(about = "Replay a TOML command script against an in-memory backend")]
    Run {
        /// Script file with `[[command]]` entries
        script: PathBuf,

        /// Output format for the final layout
        #[arg(short, long, default_value = "tree", value_enum)]
        format: OutputFormat,

        /// Make every session creation fail
        #[arg(long)]
        fail_creates: bool,
    },

    /// List keyboard shortcuts
    #[command(about = "List keybindings with configured overrides applied")]
    Keys,

    /// Show the effective configuration
    #[command(about = "Print the effective settings as TOML")]
    Config {
        /// Print built-in defaults instead of the loaded settings
        #[arg(long)]
        defaults: bool,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format for the run command
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented layout tree
    Tree,
    /// Output as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults_to_tree_output() {
        let cli = Cli::try_parse_from(["termdeck", "-vv", "run", "demo.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                script,
                format,
                fail_creates,
            } => {
                assert_eq!(script, PathBuf::from("demo.toml"));
                assert_eq!(format, OutputFormat::Tree);
                assert!(!fail_creates);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["termdeck", "keys", "--config", "/tmp/td", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/td")));
    }
}
