//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the mfq CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// mfq - Render media query filters for Android and Darwin
#[derive(Parser, Debug)]
#[command(name = "mfq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Target platform: android, ios or macos (default: document, config, then host)
    #[arg(long, global = true, env = "MFQ_PLATFORM")]
    pub platform: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a filter document to where text and sort keys
    #[command(alias = "r")]
    Render {
        /// Filter document (.json or .toml), or "-" for JSON on stdin
        file: PathBuf,

        /// Also print the human-readable form
        #[arg(short, long)]
        display: bool,
    },

    /// Validate a filter document without printing it
    #[command(alias = "c")]
    Check {
        /// Filter document (.json or .toml), or "-" for JSON on stdin
        file: PathBuf,
    },

    /// List the columns and operators of a dialect
    Columns {
        /// Show date columns only
        #[arg(long, conflicts_with = "operators")]
        dates: bool,

        /// Show operators instead of columns
        #[arg(long)]
        operators: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (platform, output.color, output.display)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["mfq", "render", "filter.json", "--display"]).unwrap();
        match cli.command {
            Some(Commands::Render { file, display }) => {
                assert_eq!(file, PathBuf::from("filter.json"));
                assert!(display);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_platform() {
        let cli = Cli::try_parse_from(["mfq", "columns", "--platform", "ios"]).unwrap();
        assert_eq!(cli.platform.as_deref(), Some("ios"));
    }

    #[test]
    fn test_columns_flags_conflict() {
        assert!(Cli::try_parse_from(["mfq", "columns", "--dates", "--operators"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["mfq", "-q", "-v", "config"]).is_err());
    }
}
