//! Command dispatch module for routing CLI commands to their handlers.

use std::path::Path;

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::columns::ColumnsListing;
use crate::commands::render::RenderOptions;
use crate::commands::{self, CommandContext, CommandError, Result};

/// A parsed command, borrowed from the CLI arguments.
pub enum Dispatch<'a> {
    Render { file: &'a Path, display: bool },
    Check { file: &'a Path },
    Columns(ColumnsListing),
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> Dispatch<'a> {
    /// Creates a dispatch from the CLI command.
    pub fn from_cli(cli: &'a Cli) -> Self {
        match &cli.command {
            Some(Commands::Render { file, display }) => Self::Render {
                file,
                display: *display,
            },
            Some(Commands::Check { file }) => Self::Check { file },
            Some(Commands::Columns { dates, operators }) => {
                Self::Columns(ColumnsListing::from_flags(*dates, *operators))
            }
            Some(Commands::Config { command }) => Self::Config(command),
            Some(Commands::Completions { shell }) => Self::Completions(shell),
            None => Self::Help,
        }
    }

    /// Executes the command.
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Render { file, display } => {
                let opts = RenderOptions {
                    file,
                    display: *display,
                };
                commands::render::execute(ctx, &opts)
            }
            Self::Check { file } => commands::render::execute_check(ctx, file),
            Self::Columns(listing) => commands::columns::execute(ctx, *listing),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("mfq - media query filter renderer");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}
