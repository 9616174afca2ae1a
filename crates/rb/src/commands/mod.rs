//! Command implementations for the rb CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod browse;
pub mod completions;
pub mod config;
pub mod health;
pub mod list;
pub mod show;

use std::time::Duration;

use recipe_api_rs::client::{RecipeClient, BASE_URL};
use recipe_browser_rs::{BrowserError, FetchFailure, TriggerPolicy, DEFAULT_PAGE_SIZE};

use crate::cli::Cli;
use config::Config;

/// Default request timeout when none is configured.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default retry count for rate-limited requests when none is configured.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Invalid browsing input (page size, row, filter field).
    #[error("{0}")]
    Browser(#[from] BrowserError),

    /// A fetch ended in an error state.
    #[error("request failed: {0}")]
    Fetch(#[from] FetchFailure),

    /// API error outside a browsing session.
    #[error("API error: {0}")]
    Api(#[from] recipe_api_rs::error::Error),

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

impl CommandError {
    /// Returns the error code string for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Browser(_) => "INPUT_ERROR",
            CommandError::Fetch(_) => "FETCH_ERROR",
            CommandError::Api(_) => "API_ERROR",
            CommandError::Config(_) => "CONFIG_ERROR",
            CommandError::Io(_) => "IO_ERROR",
            CommandError::Json(_) => "JSON_ERROR",
        }
    }

    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Browser(_) => 1,
            CommandError::Json(_) => 1,
            CommandError::Fetch(_) => 2,
            CommandError::Api(e) => u8::try_from(e.exit_code()).unwrap_or(2),
            CommandError::Io(_) => 3,
            CommandError::Config(_) => 5,
        }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
#[derive(Debug)]
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }

    /// Applies config-file preferences that the command line did not
    /// override.
    pub fn with_config(mut self, config: &Config) -> Self {
        if config.output.color == Some(false) {
            self.use_colors = false;
        }
        self
    }
}

/// Effective settings after merging flags, environment and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub page_size: u32,
    pub trigger: TriggerPolicy,
    pub request_timeout: Duration,
    pub max_retries: u32,
}

impl Settings {
    /// Resolves settings with priority: flag > env > config > default.
    ///
    /// `--api-base` and `RB_API_BASE` both arrive through `cli.api_base`.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let api_base = cli
            .api_base
            .clone()
            .or_else(|| config.api_base.clone())
            .unwrap_or_else(|| BASE_URL.to_string());

        Self {
            api_base,
            page_size: config.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            trigger: config.trigger.unwrap_or_default(),
            request_timeout: Duration::from_secs(
                config
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            max_retries: config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        }
    }

    /// Builds an API client for these settings.
    pub fn client(&self) -> Result<RecipeClient> {
        let client = RecipeClient::builder()
            .base_url(self.api_base.as_str())
            .request_timeout(self.request_timeout)
            .max_retries(self.max_retries)
            .build()?;
        tracing::debug!(
            base_url = client.base_url(),
            max_retries = client.max_retries(),
            initial_backoff = ?client.initial_backoff(),
            max_backoff = ?client.max_backoff(),
            "api client ready"
        );
        Ok(client)
    }
}
