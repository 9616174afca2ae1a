use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError, Settings};
use dispatch::{LocalCommand, LocalDispatch, RemoteCommand, RemoteDispatch};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&cli, &e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Installs the stderr log subscriber. `RB_LOG` overrides the level implied
/// by `--quiet` and `--verbose`.
fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("RB_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // A second init (only possible in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn report_error(cli: &Cli, e: &CommandError) {
    if cli.json {
        let error_json = serde_json::json!({
            "error": {
                "code": e.code(),
                "message": e.to_string(),
            }
        });
        match serde_json::to_string_pretty(&error_json) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("{error_json}"),
        }
    } else {
        eprintln!("Error: {e}");
    }
}

async fn run(cli: &Cli) -> commands::Result<()> {
    // Local commands (config, completions, help) work even with a broken
    // config file.
    if let Some(dispatch) = LocalDispatch::try_from_cli(cli) {
        return dispatch.execute(&CommandContext::from_cli(cli));
    }

    let (ctx, settings) = resolve_settings(cli)?;
    tracing::debug!(
        api_base = %settings.api_base,
        page_size = settings.page_size,
        "resolved settings"
    );

    match RemoteDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx, &settings).await,
        None => Ok(()),
    }
}

/// Loads the config file and merges it with the command line.
fn resolve_settings(cli: &Cli) -> commands::Result<(CommandContext, Settings)> {
    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli).with_config(&config);
    Ok((ctx, Settings::resolve(cli, &config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    /// Points `RB_CONFIG` at a temp file with `contents` and clears
    /// `RB_API_BASE` for the duration of `f`.
    fn with_config<T>(contents: Option<&str>, f: impl FnOnce() -> T) -> T {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        if let Some(contents) = contents {
            fs::write(&config_path, contents).unwrap();
        }

        let original_config = env::var("RB_CONFIG").ok();
        let original_base = env::var("RB_API_BASE").ok();
        env::set_var("RB_CONFIG", &config_path);
        env::remove_var("RB_API_BASE");

        let result = f();

        match original_config {
            Some(val) => env::set_var("RB_CONFIG", val),
            None => env::remove_var("RB_CONFIG"),
        }
        if let Some(val) = original_base {
            env::set_var("RB_API_BASE", val);
        }
        result
    }

    #[test]
    #[serial]
    fn test_settings_without_config_file() {
        let (ctx, settings) = with_config(None, || {
            resolve_settings(&Cli::parse_from(["rb", "list"])).unwrap()
        });
        assert_eq!(settings.api_base, "http://localhost:8000/api");
        assert_eq!(settings.page_size, 15);
        assert!(ctx.use_colors);
    }

    #[test]
    #[serial]
    fn test_settings_from_config_file() {
        let config = r#"
api_base = "http://recipes.internal/api"
page_size = 25
trigger = "explicit"

[output]
color = false
"#;
        let (ctx, settings) = with_config(Some(config), || {
            resolve_settings(&Cli::parse_from(["rb", "list"])).unwrap()
        });
        assert_eq!(settings.api_base, "http://recipes.internal/api");
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.trigger, recipe_browser_rs::TriggerPolicy::Explicit);
        assert!(!ctx.use_colors);
    }

    #[test]
    #[serial]
    fn test_env_overrides_config_file() {
        let config = r#"api_base = "http://config/api""#;
        let settings = with_config(Some(config), || {
            env::set_var("RB_API_BASE", "http://env/api");
            let cli = Cli::parse_from(["rb", "list"]);
            env::remove_var("RB_API_BASE");
            resolve_settings(&cli).unwrap().1
        });
        assert_eq!(settings.api_base, "http://env/api");
    }

    #[test]
    #[serial]
    fn test_flag_overrides_env() {
        let settings = with_config(None, || {
            env::set_var("RB_API_BASE", "http://env/api");
            let cli = Cli::parse_from(["rb", "--api-base", "http://flag/api", "list"]);
            env::remove_var("RB_API_BASE");
            resolve_settings(&cli).unwrap().1
        });
        assert_eq!(settings.api_base, "http://flag/api");
    }

    #[test]
    #[serial]
    fn test_broken_config_is_config_error() {
        let err = with_config(Some("page_size = ["), || {
            resolve_settings(&Cli::parse_from(["rb", "list"])).unwrap_err()
        });
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert_eq!(err.exit_code(), 5);
    }
}
