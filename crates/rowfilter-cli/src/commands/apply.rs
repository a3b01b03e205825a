//! Apply command implementation.
//!
//! Reads a table, filters it with saved or inline parameters, and prints the
//! result.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use rowfilter::{render, FilterParams, Polarity, RenderOutput, Table};

use super::{read_json, CommandContext, CommandError, Result};
use crate::output::{format_table_json, format_table_text};

/// Options for the apply command.
#[derive(Debug, Default)]
pub struct ApplyOptions {
    /// Table file (JSON).
    pub table: PathBuf,
    /// Saved parameters file (JSON); inline options are ignored when set.
    pub params: Option<PathBuf>,
    pub column: Option<String>,
    pub condition: Option<usize>,
    pub value: Option<String>,
    pub drop: bool,
    pub case_sensitive: bool,
    pub ignore_case: bool,
    pub colnames: Option<String>,
    pub regex: bool,
}

/// Executes the apply command.
pub fn execute(ctx: &CommandContext, opts: &ApplyOptions) -> Result<()> {
    let table: Table = read_json(&opts.table)?;
    let params = resolve_params(ctx, opts)?;

    let filtered = filter(&table, &params)?;

    if ctx.json_output {
        println!("{}", format_table_json(&filtered)?);
        return Ok(());
    }

    print!("{}", format_table_text(&filtered, ctx.use_colors));
    if !ctx.quiet {
        let summary = format!("{} of {} rows", filtered.num_rows(), table.num_rows());
        if ctx.use_colors {
            println!("\n{}", summary.dimmed());
        } else {
            println!("\n{summary}");
        }
    }

    Ok(())
}

/// Builds parameters from the saved file, or from the inline options.
fn resolve_params(ctx: &CommandContext, opts: &ApplyOptions) -> Result<FilterParams> {
    if let Some(path) = &opts.params {
        return read_json(path);
    }

    // An explicit flag wins over the configured default.
    let case_sensitive = if opts.case_sensitive {
        true
    } else if opts.ignore_case {
        false
    } else {
        ctx.case_sensitive
    };

    let polarity = if opts.drop {
        Polarity::Drop
    } else {
        Polarity::Keep
    };

    Ok(FilterParams {
        column: opts.column.clone().unwrap_or_default(),
        condition: opts.condition.unwrap_or_default(),
        value: opts.value.clone().unwrap_or_default(),
        keep: polarity.menu_index(),
        casesensitive: case_sensitive,
        // Inline parameters are always current-schema, so the regex flag
        // only travels with colnames.
        regex: opts.colnames.as_ref().map(|_| opts.regex),
        colnames: opts.colnames.clone(),
    })
}

/// Runs the engine, turning its message into a command error.
fn filter(table: &Table, params: &FilterParams) -> Result<Table> {
    match render(table, params) {
        RenderOutput::Table(filtered) => Ok(filtered),
        RenderOutput::Error(message) => Err(CommandError::Filter(message)),
    }
}
