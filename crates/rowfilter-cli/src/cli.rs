//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the rowfilter CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rowfilter::Condition;

/// rowfilter - Filter the rows of a table by a single condition
#[derive(Parser, Debug)]
#[command(name = "rowfilter")]
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

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter a table and print the result
    #[command(alias = "a")]
    Apply {
        /// Table to filter (JSON)
        #[arg(short, long)]
        table: PathBuf,

        /// Saved filter parameters (JSON); replaces the inline options
        #[arg(
            short,
            long,
            conflicts_with_all = ["column", "condition", "value", "drop", "case_sensitive", "ignore_case", "colnames", "regex"]
        )]
        params: Option<PathBuf>,

        /// Column to filter on
        #[arg(short, long)]
        column: Option<String>,

        /// Condition name (e.g. "text-contains") or menu index
        #[arg(long, value_parser = parse_condition)]
        condition: Option<usize>,

        /// Value to compare against
        #[arg(long)]
        value: Option<String>,

        /// Drop matching rows instead of keeping them
        #[arg(long)]
        drop: bool,

        /// Compare text case-sensitively (default: from config)
        #[arg(long)]
        case_sensitive: bool,

        /// Compare text case-insensitively, overriding the config
        #[arg(long, conflicts_with = "case_sensitive")]
        ignore_case: bool,

        /// Search these comma-separated columns instead of one column
        #[arg(long)]
        colnames: Option<String>,

        /// Treat the search value as a regular expression (with --colnames)
        #[arg(long, requires = "colnames")]
        regex: bool,
    },

    /// Upgrade saved parameters to the current menu
    #[command(alias = "m")]
    Migrate {
        /// Saved filter parameters (JSON)
        #[arg(short, long)]
        params: PathBuf,
    },

    /// List the condition menu
    Conditions,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (case_sensitive, output.color, output.format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,

    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parses a condition given by kebab-case name or by menu index.
///
/// Indices are passed through unchecked so that a separator slot reports the
/// same message a saved parameter file would.
fn parse_condition(s: &str) -> Result<usize, String> {
    if let Ok(index) = s.parse::<usize>() {
        return Ok(index);
    }
    s.parse::<Condition>()
        .map(Condition::menu_index)
        .map_err(|_| format!("unknown condition '{s}' (see `rowfilter conditions`)"))
}
