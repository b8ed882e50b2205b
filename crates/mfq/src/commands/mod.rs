//! Command implementations for the mfq CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod columns;
pub mod completions;
pub mod config;
pub mod render;

use media_filter::{Dialect, FilterError};

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter construction or validation error.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML document could not be parsed.
    #[error("invalid TOML document: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Platform named by flag or environment.
    pub platform: Option<String>,
    /// Whether render prints display text without being asked.
    pub display_by_default: bool,
    /// Platform from the config file, consulted after flag and document.
    pub config_platform: Option<String>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            platform: cli.platform.clone(),
            display_by_default: false,
            config_platform: None,
        }
    }

    /// Applies the config file: output preferences and the default platform.
    ///
    /// Flags always win: a config can turn colors off but not back on.
    pub fn with_config(mut self, config: &config::Config) -> Self {
        if config.output.color == Some(false) {
            self.use_colors = false;
        }
        self.display_by_default = config.output.display.unwrap_or(false);
        self.config_platform = config.platform.clone();
        self
    }

    /// Resolves the dialect to render for.
    ///
    /// The first platform found wins, in this order: `--platform` (or
    /// `MFQ_PLATFORM`), `document_platform`, the config file, the host.
    pub fn resolve_dialect(&self, document_platform: Option<&str>) -> Result<Dialect> {
        if let Some(id) = self.platform.as_deref().or(document_platform) {
            return Ok(Dialect::from_platform_id(id)?);
        }

        if let Some(id) = self.config_platform.as_deref() {
            tracing::debug!(platform = id, "Using platform from config");
            return Ok(Dialect::from_platform_id(id)?);
        }

        Ok(Dialect::current()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(platform: Option<&str>) -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: false,
            verbose: false,
            platform: platform.map(String::from),
            display_by_default: false,
            config_platform: None,
        }
    }

    #[test]
    fn test_flag_platform_wins_over_document() {
        let dialect = ctx(Some("android")).resolve_dialect(Some("ios")).unwrap();
        assert_eq!(dialect, Dialect::Android);
    }

    #[test]
    fn test_document_platform_used_without_flag() {
        let dialect = ctx(None).resolve_dialect(Some("macos")).unwrap();
        assert_eq!(dialect, Dialect::Darwin);
    }

    #[test]
    fn test_unknown_platform_is_filter_error() {
        let err = ctx(Some("beos")).resolve_dialect(None).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Filter(FilterError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn test_config_platform_used_without_flag_or_document() {
        let config = config::Config {
            platform: Some("android".into()),
            ..Default::default()
        };
        let dialect = ctx(None).with_config(&config).resolve_dialect(None).unwrap();
        assert_eq!(dialect, Dialect::Android);
    }

    #[test]
    fn test_document_platform_wins_over_config() {
        let config = config::Config {
            platform: Some("android".into()),
            ..Default::default()
        };
        let dialect = ctx(None)
            .with_config(&config)
            .resolve_dialect(Some("ios"))
            .unwrap();
        assert_eq!(dialect, Dialect::Darwin);
    }

    #[test]
    fn test_config_output_preferences() {
        let mut config = config::Config::default();
        config.output.color = Some(false);
        config.output.display = Some(true);
        let mut base = ctx(None);
        base.use_colors = true;
        let ctx = base.with_config(&config);
        assert!(!ctx.use_colors);
        assert!(ctx.display_by_default);
        assert_eq!(ctx.config_platform, None);
    }
}
