use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::{Cli, Commands};
use commands::config::{load_config, Config};
use commands::{CommandContext, CommandError};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
const LOG_ENV: &str = "ROWFILTER_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = resolve_config(&cli);
    let json = wants_json(&cli, config.as_ref().ok());

    match config.and_then(|config| run(&cli, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Loads the config file, falling back to defaults for config commands.
fn resolve_config(cli: &Cli) -> commands::Result<Config> {
    match load_config() {
        Ok(config) => Ok(config),
        // Config commands must still work when the file is broken.
        Err(e) if matches!(cli.command, Some(Commands::Config { .. })) => {
            tracing::warn!(error = %e, "Ignoring unreadable config");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

/// Returns true if errors should be printed as JSON.
///
/// Follows the same resolution as command output; without a config only
/// `--json` counts.
fn wants_json(cli: &Cli, config: Option<&Config>) -> bool {
    config.map_or(cli.json, |config| CommandContext::new(cli, config).json_output)
}

fn run(cli: &Cli, config: &Config) -> commands::Result<()> {
    tracing::debug!(?config, "Loaded config");
    let ctx = CommandContext::new(cli, config);
    dispatch::dispatch(cli, &ctx)
}

/// Installs the stderr log subscriber.
///
/// `-v` forces debug and `-q` forces error; otherwise the filter comes from
/// `ROWFILTER_LOG`, then `RUST_LOG`, then defaults to warn.
fn init_logging(cli: &Cli) {
    let filter = if cli.verbose {
        "debug".to_string()
    } else if cli.quiet {
        "error".to_string()
    } else {
        std::env::var(LOG_ENV)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string())
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .compact()
        .init();
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) | CommandError::Json(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Config(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::config::{OutputConfig, OutputFormat};

    #[test]
    fn test_error_codes() {
        assert_eq!(error_code(&CommandError::Filter("x".into())), "FILTER_ERROR");
        assert_eq!(error_code(&CommandError::Config("x".into())), "CONFIG_ERROR");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(error_code(&CommandError::Io(io)), "IO_ERROR");
    }

    #[test]
    fn test_exit_statuses() {
        assert_eq!(exit_status(&CommandError::Filter("x".into())), 1);
        assert_eq!(exit_status(&CommandError::Config("x".into())), 5);

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(exit_status(&CommandError::Io(io)), 3);
    }

    #[test]
    fn test_json_errors_follow_config_format() {
        let plain = Cli::try_parse_from(["rowfilter", "conditions"]).unwrap();
        let flagged = Cli::try_parse_from(["rowfilter", "--json", "conditions"]).unwrap();
        let config = Config {
            output: OutputConfig {
                format: Some(OutputFormat::Json),
                ..OutputConfig::default()
            },
            ..Config::default()
        };

        assert!(wants_json(&plain, Some(&config)));
        assert!(!wants_json(&plain, Some(&Config::default())));
        assert!(!wants_json(&plain, None));
        assert!(wants_json(&flagged, None));
    }

    #[test]
    fn test_filter_error_displays_engine_message() {
        let e = CommandError::Filter("Please choose a condition".into());
        assert_eq!(e.to_string(), "Please choose a condition");
    }
}
