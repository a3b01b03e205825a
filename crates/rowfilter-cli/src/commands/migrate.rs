//! Migrate command implementation.
//!
//! Prints saved parameters upgraded to the current condition menu.

use std::path::Path;

use rowfilter::{migrate_params, FilterParams};

use super::{read_json, CommandContext, Result};

/// Executes the migrate command.
///
/// Output is always JSON, since the result is meant to be saved back.
pub fn execute(ctx: &CommandContext, path: &Path) -> Result<()> {
    let params: FilterParams = read_json(path)?;
    let was_legacy = params.is_legacy();
    let migrated = migrate_params(params);

    println!("{}", serde_json::to_string_pretty(&migrated)?);
    if ctx.verbose && !ctx.json_output {
        let note = if was_legacy {
            "Upgraded legacy parameters."
        } else {
            "Parameters already current."
        };
        eprintln!("{note}");
    }

    Ok(())
}
