//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/rowfilter/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ROWFILTER_CONFIG";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# rowfilter configuration

# Config schema version (do not modify)
version = 1

# Compare text case-sensitively by default (override with --ignore-case)
# case_sensitive = false

# Output preferences
[output]
# color = true        # Enable colors (respects NO_COLOR env)
# format = "table"    # "table" or "json"
"#;

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default case sensitivity for text conditions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            case_sensitive: None,
            output: OutputConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Default output format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(CommandError::Config(format!(
                "Invalid format value '{s}'. Valid values: table, json"
            ))),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

/// Gets the config file path.
///
/// Uses XDG-style paths: ~/.config/rowfilter/ on all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("rowfilter").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| {
            dirs.home_dir()
                .join(".config")
                .join("rowfilter")
                .join("config.toml")
        })
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

/// Loads the configuration at `path`; a missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {e}")))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {e}")))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
/// Returns the config as-is if already at current version.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        tracing::warn!(
            version = config.version,
            supported = CONFIG_VERSION,
            "Config file is newer than this build, reading known keys only"
        );
    }

    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Writes `config` to `path`, creating parent directories.
fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    create_parent_dir(path)?;

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {e}")))?;

    fs::write(path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {e}")))?;

    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {e}")))?;
    }
    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let config = load_config_from(&path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{header}\n");
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(case_sensitive) = config.case_sensitive {
                println!("  case_sensitive: {case_sensitive}");
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {color}");
            }
            if let Some(format) = config.output.format {
                println!("  format: {}", format.as_str());
            }
        } else {
            println!("(No config file exists. Run 'rowfilter config init' to create one.)");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let path = get_config_path()?;
    let mut config = load_config_from(&path)?;

    set_value(&mut config, &opts.key, &opts.value)?;
    save_config_to(&path, &config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Applies `key = value` to `config`.
fn set_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "case_sensitive" => config.case_sensitive = Some(parse_bool(value)?),
        "output.color" => config.output.color = Some(parse_bool(value)?),
        "output.format" => config.output.format = Some(OutputFormat::parse(value)?),
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{key}'. Valid keys: case_sensitive, output.color, output.format"
            )));
        }
    }
    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path()?;
    write_default_config(&path, force)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created default config at: {}", path.display());
    }

    Ok(())
}

/// Writes the commented default config, refusing to clobber without `force`.
fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    create_parent_dir(path)?;
    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to create config file: {e}")))?;

    Ok(())
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{s}'. Use true/false, yes/no, 1/0, or on/off"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_bool_true_values() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("True").unwrap());
        assert!(parse_bool("yes").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(parse_bool("on").unwrap());
    }

    #[test]
    fn test_parse_bool_false_values() {
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("FALSE").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("off").unwrap());
    }

    #[test]
    fn test_parse_bool_invalid() {
        assert!(parse_bool("maybe").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_config_names_apply_flags() {
        use crate::cli::Cli;
        use clap::CommandFactory;

        let cli = Cli::command();
        let apply = cli.find_subcommand("apply").unwrap();
        let flags: Vec<String> = DEFAULT_CONFIG
            .split_whitespace()
            .filter_map(|word| word.trim_matches(|c| c == '(' || c == ')').strip_prefix("--"))
            .map(str::to_string)
            .collect();

        assert_eq!(flags, vec!["ignore-case"]);
        for flag in &flags {
            assert!(
                apply.get_arguments().any(|arg| arg.get_long() == Some(flag.as_str())),
                "unknown flag --{flag}"
            );
        }
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1
case_sensitive = true

[output]
color = false
format = "json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.case_sensitive, Some(true));
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_config_deserialization_empty() {
        let config: Config = toml::from_str("").unwrap();
        // Missing version defaults to current version
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.case_sensitive.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_config_rejects_unknown_format() {
        let result: std::result::Result<Config, _> = toml::from_str("[output]\nformat = \"csv\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_migrate_config_caps_future_version() {
        let config = Config {
            version: 999,
            case_sensitive: Some(true),
            ..Config::default()
        };
        let migrated = migrate_config(config).unwrap();
        assert_eq!(migrated.version, CONFIG_VERSION);
        assert_eq!(migrated.case_sensitive, Some(true));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "case_sensitive = \"sometimes\"").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    fn test_set_and_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = load_config_from(&path).unwrap();
        set_value(&mut config, "case_sensitive", "yes").unwrap();
        set_value(&mut config, "output.format", "JSON").unwrap();
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.case_sensitive, Some(true));
        assert_eq!(loaded.output.format, Some(OutputFormat::Json));
        assert!(loaded.output.color.is_none());
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = Config::default();
        let err = set_value(&mut config, "output.width", "80").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_write_default_config_refuses_to_clobber() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        write_default_config(&path, false).unwrap();
        assert!(write_default_config(&path, false).is_err());
        write_default_config(&path, true).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), Config::default());
    }
}
