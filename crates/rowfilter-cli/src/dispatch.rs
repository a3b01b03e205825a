//! Command dispatch module for routing CLI commands to their handlers.

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::{self, apply::ApplyOptions, CommandContext, Result};

/// Routes the parsed command to its handler.
pub fn dispatch(cli: &Cli, ctx: &CommandContext) -> Result<()> {
    match &cli.command {
        Some(Commands::Apply {
            table,
            params,
            column,
            condition,
            value,
            drop,
            case_sensitive,
            ignore_case,
            colnames,
            regex,
        }) => {
            let opts = ApplyOptions {
                table: table.clone(),
                params: params.clone(),
                column: column.clone(),
                condition: *condition,
                value: value.clone(),
                drop: *drop,
                case_sensitive: *case_sensitive,
                ignore_case: *ignore_case,
                colnames: colnames.clone(),
                regex: *regex,
            };
            commands::apply::execute(ctx, &opts)
        }
        Some(Commands::Migrate { params }) => commands::migrate::execute(ctx, params),
        Some(Commands::Conditions) => commands::conditions::execute(ctx),
        Some(Commands::Config { command }) => dispatch_config(ctx, command),
        None => {
            if !ctx.quiet {
                println!("rowfilter - filter table rows by a single condition");
                println!("Use --help for usage information");
            }
            Ok(())
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
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
    }
}
