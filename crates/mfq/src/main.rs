use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::Dispatch;
use media_filter::FilterError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&error_json).unwrap_or_else(|_| e.to_string())
                );
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let mut ctx = CommandContext::from_cli(cli);

    // The only load the command context sees. A broken file falls back to
    // defaults instead of failing the command.
    match load_config() {
        Ok(config) => ctx = ctx.with_config(&config),
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable config"),
    }

    Dispatch::from_cli(cli).execute(&ctx)
}

/// Installs the log subscriber.
///
/// `MFQ_LOG` or `RUST_LOG` select the filter; `--verbose` turns on debug
/// output for the mfq crates.
fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose {
        "warn,media_filter=debug,mfq=debug"
    } else {
        "warn"
    };

    let filter = std::env::var("MFQ_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_filter.to_string());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .compact()
        .with_env_filter(filter)
        .init();
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(FilterError::UnsupportedPlatform { .. }) => "UNSUPPORTED_PLATFORM",
        CommandError::Filter(FilterError::InvalidDocument { .. }) => "INVALID_DOCUMENT",
        CommandError::Filter(_) => "VALIDATION_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
        CommandError::Toml(_) => "INVALID_DOCUMENT",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Filter(FilterError::UnsupportedPlatform { .. }) => ExitCode::from(5),
        CommandError::Filter(_) => ExitCode::from(1),
        CommandError::Toml(_) => ExitCode::from(1),
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = CommandError::Filter(FilterError::unsupported_platform("linux"));
        assert_eq!(error_code(&err), "UNSUPPORTED_PLATFORM");
        assert_eq!(error_exit_code(&err), ExitCode::from(5));

        let err = CommandError::Filter(FilterError::date_column_in_comparison("date_added"));
        assert_eq!(error_code(&err), "VALIDATION_ERROR");
        assert_eq!(error_exit_code(&err), ExitCode::from(1));

        let err = CommandError::Config("bad".into());
        assert_eq!(error_code(&err), "CONFIG_ERROR");
    }
}
