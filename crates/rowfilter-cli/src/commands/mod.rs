//! Command implementations for the rowfilter CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod apply;
pub mod conditions;
pub mod config;
pub mod migrate;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::cli::Cli;
use config::{Config, OutputFormat};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The filter rejected its input; the message is meant for the user.
    #[error("{0}")]
    Filter(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
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
    /// Case sensitivity used when a command does not ask for it.
    pub case_sensitive: bool,
}

impl CommandContext {
    /// Creates a command context from CLI arguments and the loaded config.
    ///
    /// Flags win over config; `NO_COLOR` turns colors off either way.
    pub fn new(cli: &Cli, config: &Config) -> Self {
        let color_env_off = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json || config.output.format == Some(OutputFormat::Json),
            use_colors: !cli.no_color && !color_env_off && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
            case_sensitive: config.case_sensitive.unwrap_or(false),
        }
    }
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), "Read JSON input");
    Ok(value)
}
