//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split by whether they talk to the recipe service. Local commands
//! run without resolving settings or building a client; remote commands get
//! both.

use recipe_browser_rs::TriggerPolicy;

use crate::cli::{Cli, Commands, ConfigCommands, QueryArgs, Shell};
use crate::commands::{self, CommandContext, CommandError, Result, Settings};

/// Trait for commands that never contact the recipe service.
pub trait LocalCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that need the recipe service.
#[allow(async_fn_in_trait)]
pub trait RemoteCommand {
    /// Execute the command with resolved settings.
    async fn execute(&self, ctx: &CommandContext, settings: &Settings) -> Result<()>;
}

/// Commands that don't contact the service.
pub enum LocalDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Try to create a local dispatch from the CLI command.
    /// Returns None if the command needs the service.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl LocalCommand for LocalDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("rb - browse the recipe catalog");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
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
    }
}

/// Commands that need the service.
pub enum RemoteDispatch<'a> {
    List {
        query: &'a QueryArgs,
    },
    Show {
        row: usize,
        query: &'a QueryArgs,
    },
    Browse {
        query: &'a QueryArgs,
        trigger: Option<TriggerPolicy>,
    },
    Health,
}

impl<'a> RemoteDispatch<'a> {
    /// Create a remote dispatch from the CLI command.
    /// Returns None for local commands.
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::List { query }) => Some(Self::List { query }),
            Some(Commands::Show { row, query }) => Some(Self::Show { row: *row, query }),
            Some(Commands::Browse { query, trigger }) => Some(Self::Browse {
                query,
                trigger: trigger.map(TriggerPolicy::from),
            }),
            Some(Commands::Health) => Some(Self::Health),
            _ => None,
        }
    }
}

impl RemoteCommand for RemoteDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext, settings: &Settings) -> Result<()> {
        let client = settings.client()?;

        match self {
            Self::List { query } => {
                let opts = commands::list::ListOptions {
                    query: (*query).clone(),
                };
                commands::list::execute(ctx, settings, client, &opts).await
            }

            Self::Show { row, query } => {
                let opts = commands::show::ShowOptions {
                    row: *row,
                    query: (*query).clone(),
                };
                commands::show::execute(ctx, settings, client, &opts).await
            }

            Self::Browse { query, trigger } => {
                let opts = commands::browse::BrowseOptions {
                    query: (*query).clone(),
                    trigger: trigger.unwrap_or(settings.trigger),
                };
                commands::browse::execute(ctx, settings, client, &opts).await
            }

            Self::Health => commands::health::execute(ctx, &client).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_local_dispatch_config_show() {
        let cli = Cli::parse_from(["rb", "config", "show"]);
        let dispatch = LocalDispatch::try_from_cli(&cli);
        assert!(matches!(dispatch, Some(LocalDispatch::Config(_))));
    }

    #[test]
    fn test_local_dispatch_completions() {
        let cli = Cli::parse_from(["rb", "completions", "zsh"]);
        let dispatch = LocalDispatch::try_from_cli(&cli);
        assert!(matches!(dispatch, Some(LocalDispatch::Completions(_))));
    }

    #[test]
    fn test_local_dispatch_help() {
        let cli = Cli::parse_from(["rb"]);
        let dispatch = LocalDispatch::try_from_cli(&cli);
        assert!(matches!(dispatch, Some(LocalDispatch::Help)));
    }

    #[test]
    fn test_local_dispatch_returns_none_for_list() {
        let cli = Cli::parse_from(["rb", "list"]);
        assert!(LocalDispatch::try_from_cli(&cli).is_none());
    }

    #[test]
    fn test_remote_dispatch_list() {
        let cli = Cli::parse_from(["rb", "list", "--rating", ">=4"]);
        let dispatch = RemoteDispatch::from_cli(&cli);
        assert!(matches!(dispatch, Some(RemoteDispatch::List { .. })));
    }

    #[test]
    fn test_remote_dispatch_show_row() {
        let cli = Cli::parse_from(["rb", "show", "4"]);
        assert!(matches!(
            RemoteDispatch::from_cli(&cli),
            Some(RemoteDispatch::Show { row: 4, .. })
        ));
    }

    #[test]
    fn test_remote_dispatch_browse_trigger() {
        let cli = Cli::parse_from(["rb", "browse", "--trigger", "explicit"]);
        assert!(matches!(
            RemoteDispatch::from_cli(&cli),
            Some(RemoteDispatch::Browse {
                trigger: Some(TriggerPolicy::Explicit),
                ..
            })
        ));

        let cli = Cli::parse_from(["rb", "browse"]);
        assert!(matches!(
            RemoteDispatch::from_cli(&cli),
            Some(RemoteDispatch::Browse { trigger: None, .. })
        ));
    }

    #[test]
    fn test_remote_dispatch_health() {
        let cli = Cli::parse_from(["rb", "health"]);
        assert!(matches!(
            RemoteDispatch::from_cli(&cli),
            Some(RemoteDispatch::Health)
        ));
    }

    #[test]
    fn test_remote_dispatch_returns_none_for_config() {
        let cli = Cli::parse_from(["rb", "config", "show"]);
        assert!(RemoteDispatch::from_cli(&cli).is_none());
    }
}
