//! Conditions command implementation.

use rowfilter::Condition;

use super::{CommandContext, Result};
use crate::output::{format_menu_json, format_menu_table};

/// Executes the conditions command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let menu = Condition::menu();

    if ctx.json_output {
        println!("{}", format_menu_json(&menu)?);
    } else {
        print!("{}", format_menu_table(&menu, ctx.use_colors));
    }

    Ok(())
}
