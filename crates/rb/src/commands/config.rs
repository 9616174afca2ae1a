//! The rb config file and the `config` subcommands.
//!
//! Settings live in a TOML file, by default `~/.config/rb/config.toml`.
//! `RB_CONFIG` points somewhere else.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use recipe_browser_rs::{is_valid_page_size, TriggerPolicy, PAGE_SIZES};
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Schema version written to new config files.
const CONFIG_VERSION: u32 = 1;

/// Keys accepted by `rb config set`.
const VALID_KEYS: &str =
    "api_base, page_size, trigger, request_timeout_secs, max_retries, output.color";

/// Contents of the config file. Every setting is optional.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Schema version; files without one are treated as current.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Recipe API base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Rows per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// When filter edits take effect in `rb browse`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerPolicy>,

    /// Per-request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Retries for rate-limited requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api_base: None,
            page_size: None,
            trigger: None,
            request_timeout_secs: None,
            max_retries: None,
            output: OutputConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Resolves the config file location: `RB_CONFIG`, then
/// `$XDG_CONFIG_HOME/rb/config.toml`, then `~/.config/rb/config.toml` on
/// all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("RB_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("rb").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("rb").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk. A missing file is an empty config.
///
/// Values edited by hand are checked the same way `config set` checks them.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;
    let config = read_config(&path)?;
    validate_config(&config).map_err(|e| {
        CommandError::Config(format!("invalid config file {}: {}", path.display(), e))
    })?;
    Ok(config)
}

/// Parses the config file without checking values, so `config set` can
/// repair a bad one.
fn read_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| {
            CommandError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| {
            CommandError::Config(format!("invalid config file {}: {}", path.display(), e))
        })?;

    migrate_config(config)
}

/// Rejects values that `config set` would not have written.
fn validate_config(config: &Config) -> std::result::Result<(), String> {
    if let Some(size) = config.page_size {
        if !is_valid_page_size(size) {
            return Err(invalid_page_size(size));
        }
    }
    if config.request_timeout_secs == Some(0) {
        return Err("request_timeout_secs must be positive".to_string());
    }
    Ok(())
}

fn invalid_page_size(value: impl std::fmt::Display) -> String {
    let choices: Vec<String> = PAGE_SIZES.iter().map(u32::to_string).collect();
    format!(
        "Invalid page_size '{}'. Valid values: {}",
        value,
        choices.join(", ")
    )
}

/// Brings an older config up to [`CONFIG_VERSION`].
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the only schema so far.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk, creating the directory if needed.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("cannot create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("cannot encode config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| {
            CommandError::Config(format!("cannot write {}: {}", path.display(), e))
        })?;

    Ok(())
}

/// Prints the effective config file contents.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    use owo_colors::OwoColorize;

    let header = "Configuration";
    if ctx.use_colors {
        println!("{}\n", header.green().bold());
    } else {
        println!("{}\n", header);
    }

    println!("File: {}", path.display());
    println!("Exists: {}\n", path.exists());

    if !path.exists() {
        println!("(No config file exists. Run 'rb config set <key> <value>' to create one.)");
        return Ok(());
    }

    println!("Settings:");
    if let Some(ref api_base) = config.api_base {
        println!("  api_base: {}", api_base);
    }
    if let Some(size) = config.page_size {
        println!("  page_size: {}", size);
    }
    if let Some(trigger) = config.trigger {
        println!("  trigger: {}", trigger);
    }
    if let Some(secs) = config.request_timeout_secs {
        println!("  request_timeout_secs: {}", secs);
    }
    if let Some(retries) = config.max_retries {
        println!("  max_retries: {}", retries);
    }

    println!("\n[output]");
    if let Some(color) = config.output.color {
        println!("  color: {}", color);
    }

    Ok(())
}

/// Key and value for `config set`.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Applies one `key = value` pair to `config`, validating the value.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "api_base" => {
            let value = value.trim();
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(CommandError::Config(format!(
                    "Invalid api_base '{}'. Expected an http:// or https:// URL",
                    value
                )));
            }
            config.api_base = Some(value.trim_end_matches('/').to_string());
        }
        "page_size" => {
            let size = value.parse::<u32>().ok().filter(|s| is_valid_page_size(*s));
            let Some(size) = size else {
                return Err(CommandError::Config(invalid_page_size(value)));
            };
            config.page_size = Some(size);
        }
        "trigger" => {
            let trigger = value.parse::<TriggerPolicy>().map_err(|_| {
                CommandError::Config(format!(
                    "Invalid trigger '{}'. Valid values: immediate, explicit",
                    value
                ))
            })?;
            config.trigger = Some(trigger);
        }
        "request_timeout_secs" => {
            let secs = value.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                CommandError::Config(format!(
                    "Invalid request_timeout_secs '{}'. Expected a positive number",
                    value
                ))
            })?;
            config.request_timeout_secs = Some(secs);
        }
        "max_retries" => {
            let retries = value.parse::<u32>().map_err(|_| {
                CommandError::Config(format!(
                    "Invalid max_retries '{}'. Expected a number",
                    value
                ))
            })?;
            config.max_retries = Some(retries);
        }
        "output.color" => {
            config.output.color = Some(parse_bool(value)?);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: {}",
                key, VALID_KEYS
            )));
        }
    }
    Ok(())
}

/// Validates and stores one setting.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = read_config(&get_config_path()?)?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

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

/// Prints where the config file is (or would be).
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

/// Accepts true/false, yes/no, 1/0 and on/off.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}
