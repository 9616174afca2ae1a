//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the rb CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};
use recipe_browser_rs::{is_valid_page_size, FilterField, FilterInputs, TriggerPolicy, PAGE_SIZES};

/// rb - Browse the recipe catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "rb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Recipe API base URL (default: from config, then http://localhost:8000/api)
    #[arg(long, global = true, env = "RB_API_BASE")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of recipes
    #[command(alias = "l")]
    List {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Show the details of one row of a page
    #[command(alias = "s")]
    Show {
        /// Row number on the page (1-based)
        row: usize,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Browse interactively
    #[command(alias = "b")]
    Browse {
        #[command(flatten)]
        query: QueryArgs,

        /// When filter edits take effect (default: from config)
        #[arg(long, value_enum)]
        trigger: Option<TriggerArg>,
    },

    /// Check that the recipe service is up
    Health,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Filters and page selection shared by the listing commands.
///
/// Comparison filters take an optional operator: `>=4.5`, `<60`, `=400` or
/// a bare `400`.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Title contains (e.g., "pie")
    #[arg(short, long)]
    pub title: Option<String>,

    /// Cuisine contains
    #[arg(short, long)]
    pub cuisine: Option<String>,

    /// Rating comparison (e.g., ">=4.5")
    #[arg(short, long, allow_hyphen_values = true)]
    pub rating: Option<String>,

    /// Total time in minutes comparison (e.g., "<=60")
    #[arg(long = "time", visible_alias = "total-time", allow_hyphen_values = true)]
    pub total_time: Option<String>,

    /// Calories comparison (e.g., "<400")
    #[arg(long, allow_hyphen_values = true)]
    pub calories: Option<String>,

    /// Page number (clamped to the last page)
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Page size: 15, 20, 25, 30, 40 or 50 (default: from config)
    #[arg(short, long, value_parser = parse_page_size)]
    pub limit: Option<u32>,
}

impl QueryArgs {
    /// The filter inputs given on the command line.
    pub fn filter_inputs(&self) -> FilterInputs {
        let mut inputs = FilterInputs::new();
        let given = [
            (FilterField::Title, &self.title),
            (FilterField::Cuisine, &self.cuisine),
            (FilterField::Rating, &self.rating),
            (FilterField::TotalTime, &self.total_time),
            (FilterField::Calories, &self.calories),
        ];
        for (field, value) in given {
            if let Some(value) = value {
                inputs.set(field, value.as_str());
            }
        }
        inputs
    }
}

fn parse_page_size(s: &str) -> Result<u32, String> {
    let size: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if is_valid_page_size(size) {
        Ok(size)
    } else {
        let choices: Vec<String> = PAGE_SIZES.iter().map(u32::to_string).collect();
        Err(format!("page size must be one of {}", choices.join(", ")))
    }
}

/// Trigger policy for the browse command
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerArg {
    /// Apply every filter edit at once
    Immediate,
    /// Collect edits until `apply`
    Explicit,
}

impl From<TriggerArg> for TriggerPolicy {
    fn from(arg: TriggerArg) -> Self {
        match arg {
            TriggerArg::Immediate => TriggerPolicy::Immediate,
            TriggerArg::Explicit => TriggerPolicy::Explicit,
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["rb", "--verbose", "list"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["rb", "--quiet", "--json", "list"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["rb", "-v", "-q", "list"]).is_err());
    }

    #[test]
    fn test_api_base_flag() {
        let cli = Cli::parse_from(["rb", "--api-base", "http://example.com/api", "health"]);
        assert_eq!(cli.api_base.as_deref(), Some("http://example.com/api"));
    }

    #[test]
    fn test_list_alias_and_defaults() {
        let cli = Cli::parse_from(["rb", "l"]);
        match cli.command {
            Some(Commands::List { query }) => {
                assert_eq!(query.page, 1);
                assert_eq!(query.limit, None);
                assert_eq!(query.filter_inputs(), FilterInputs::new());
            }
            other => panic!("Expected List command, got {:?}", other),
        }
    }

    #[test]
    fn test_list_filters() {
        let cli = Cli::parse_from([
            "rb", "list", "--rating", ">=4.5", "--time", "<=60", "-t", "pie", "--limit", "20",
        ]);
        let Some(Commands::List { query }) = cli.command else {
            panic!("Expected List command");
        };
        let inputs = query.filter_inputs();
        assert_eq!(inputs.rating, ">=4.5");
        assert_eq!(inputs.total_time, "<=60");
        assert_eq!(inputs.title, "pie");
        assert_eq!(query.limit, Some(20));
    }

    #[test]
    fn test_total_time_alias() {
        let cli = Cli::parse_from(["rb", "list", "--total-time", "<30"]);
        let Some(Commands::List { query }) = cli.command else {
            panic!("Expected List command");
        };
        assert_eq!(query.total_time.as_deref(), Some("<30"));
    }

    #[test]
    fn test_hyphen_values_accepted() {
        let cli = Cli::parse_from(["rb", "list", "--calories", "-5"]);
        let Some(Commands::List { query }) = cli.command else {
            panic!("Expected List command");
        };
        assert_eq!(query.calories.as_deref(), Some("-5"));
    }

    #[test]
    fn test_invalid_page_size_rejected() {
        assert!(Cli::try_parse_from(["rb", "list", "--limit", "15"]).is_ok());
        assert!(Cli::try_parse_from(["rb", "list", "--limit", "50"]).is_ok());
        assert!(Cli::try_parse_from(["rb", "list", "--limit", "10"]).is_err());
        assert!(Cli::try_parse_from(["rb", "list", "--limit", "abc"]).is_err());
    }

    #[test]
    fn test_show_row() {
        let cli = Cli::parse_from(["rb", "s", "3", "--cuisine", "Thai"]);
        match cli.command {
            Some(Commands::Show { row, query }) => {
                assert_eq!(row, 3);
                assert_eq!(query.cuisine.as_deref(), Some("Thai"));
            }
            other => panic!("Expected Show command, got {:?}", other),
        }
    }

    #[test]
    fn test_browse_trigger() {
        let cli = Cli::parse_from(["rb", "browse", "--trigger", "explicit"]);
        match cli.command {
            Some(Commands::Browse { trigger, .. }) => {
                assert_eq!(trigger, Some(TriggerArg::Explicit));
                assert_eq!(
                    TriggerPolicy::from(TriggerArg::Explicit),
                    TriggerPolicy::Explicit
                );
            }
            other => panic!("Expected Browse command, got {:?}", other),
        }
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::parse_from(["rb", "config", "set", "page_size", "25"]);
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Set { key, value }),
        }) = cli.command
        {
            assert_eq!(key, "page_size");
            assert_eq!(value, "25");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["rb", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
