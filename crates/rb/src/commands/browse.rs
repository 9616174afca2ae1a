//! Browse command implementation.
//!
//! A line-oriented interactive session. Typed commands and finished requests
//! are handled as they arrive, so a filter typed while a page is loading
//! supersedes that request instead of waiting for it.

use std::io::Write;
use std::str::FromStr;

use recipe_api_rs::client::RecipeClient;
use recipe_browser_rs::{Action, Browser, FilterField, RecipeSource, Session, TriggerPolicy};
use strsim::levenshtein;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use super::{CommandContext, Result, Settings};
use crate::cli::QueryArgs;
use crate::output::{
    format_filter_summary, format_recipe_details_json, format_recipe_details_table,
    format_recipes_json, format_recipes_table,
};

/// Maximum Levenshtein distance for "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Command words, in help order.
const COMMAND_NAMES: [&str; 18] = [
    "title", "cuisine", "rating", "time", "calories", "apply", "clear", "limit", "page", "first",
    "prev", "next", "last", "open", "close", "refresh", "help", "quit",
];

const HELP: &str = "\
Filters:
  title <text>        cuisine <text>
  rating <expr>       time <expr>        calories <expr>
                      (expr: >=4.5, <=60, >300, <400, =5 or a bare value;
                       no text clears the field)
  apply               commit edited filters (explicit trigger)
  clear               remove all filters
Pages:
  first  prev  next  last  page <n>  limit <15|20|25|30|40|50>
Details:
  open <row>  open #<id>  close
Other:
  refresh  help  quit
";

/// Options for the browse command.
#[derive(Debug, Clone)]
pub struct BrowseOptions {
    /// Initial filters and page size.
    pub query: QueryArgs,
    /// When filter edits take effect.
    pub trigger: TriggerPolicy,
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Browse(Action),
    Refresh,
    Help,
    Quit,
}

/// Why an input line was not understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum InputError {
    #[error("Unknown command '{input}'. Did you mean '{suggestion}'?")]
    UnknownWithSuggestion { input: String, suggestion: String },

    #[error("Unknown command '{input}'. Type 'help' for a list of commands.")]
    Unknown { input: String },

    #[error("'{command}' needs a number")]
    ExpectedNumber { command: &'static str },
}

/// Parses one input line. Blank lines yield `None`.
fn parse_command(line: &str) -> std::result::Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let word_lower = word.to_lowercase();

    if let Ok(field) = FilterField::from_str(&word_lower) {
        return Ok(Some(Command::Browse(Action::SetFilter(
            field,
            rest.to_string(),
        ))));
    }

    let command = match word_lower.as_str() {
        "apply" => Command::Browse(Action::Apply),
        "clear" => Command::Browse(Action::Clear),
        "limit" => Command::Browse(Action::SetLimit(number(rest, "limit")?)),
        "page" => Command::Browse(Action::SetPage(number(rest, "page")?)),
        "first" => Command::Browse(Action::First),
        "prev" | "p" => Command::Browse(Action::Prev),
        "next" | "n" => Command::Browse(Action::Next),
        "last" => Command::Browse(Action::Last),
        "open" => match rest.strip_prefix('#') {
            Some(id) => Command::Browse(Action::OpenId(number(id.trim(), "open #")?)),
            None => Command::Browse(Action::Open(number(rest, "open")?)),
        },
        "close" => Command::Browse(Action::Close),
        "refresh" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => {
            return Err(match find_similar_command(&word_lower) {
                Some(suggestion) => InputError::UnknownWithSuggestion {
                    input: word.to_string(),
                    suggestion: suggestion.to_string(),
                },
                None => InputError::Unknown {
                    input: word.to_string(),
                },
            })
        }
    };
    Ok(Some(command))
}

fn number<T: FromStr>(text: &str, command: &'static str) -> std::result::Result<T, InputError> {
    text.parse()
        .map_err(|_| InputError::ExpectedNumber { command })
}

/// Returns the closest command word within the suggestion threshold.
fn find_similar_command(input: &str) -> Option<&'static str> {
    let (best, distance) = COMMAND_NAMES
        .iter()
        .map(|name| (*name, levenshtein(input, name)))
        .min_by_key(|(_, d)| *d)?;

    if distance > 0 && distance <= MAX_SUGGESTION_DISTANCE {
        Some(best)
    } else {
        None
    }
}

/// What to print after handling a line.
#[derive(Debug, PartialEq, Eq)]
enum Reaction {
    /// Redraw the list.
    List,
    /// Print the detail panel.
    Detail,
    /// Print a one-off message.
    Message(String),
    /// Nothing changed.
    Nothing,
    Quit,
}

/// Applies one input line to the session.
fn handle_line<S: RecipeSource>(session: &mut Session<S>, line: &str) -> Reaction {
    let command = match parse_command(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Reaction::Nothing,
        Err(e) => return Reaction::Message(e.to_string()),
    };
    debug!(?command, "browse input");

    match command {
        Command::Quit => Reaction::Quit,
        Command::Help => Reaction::Message(HELP.to_string()),
        Command::Refresh => {
            session.refresh();
            Reaction::List
        }
        Command::Browse(action) => {
            let opens = matches!(action, Action::Open(_) | Action::OpenId(_));
            match session.dispatch(action) {
                Ok(()) if opens => Reaction::Detail,
                Ok(()) => Reaction::List,
                Err(e) => Reaction::Message(e.to_string()),
            }
        }
    }
}

fn render_list<S: RecipeSource>(
    session: &Session<S>,
    ctx: &CommandContext,
    out: &mut impl Write,
) -> Result<()> {
    let browser = session.browser();
    if ctx.json_output {
        writeln!(out, "{}", format_recipes_json(browser)?)?;
    } else {
        write!(out, "{}", format_filter_summary(browser, ctx.use_colors))?;
        write!(out, "{}", format_recipes_table(browser, ctx.use_colors))?;
    }
    Ok(())
}

fn render_detail<S: RecipeSource>(
    session: &Session<S>,
    ctx: &CommandContext,
    out: &mut impl Write,
) -> Result<()> {
    let Some(recipe) = session.browser().selected() else {
        return Ok(());
    };
    if ctx.json_output {
        writeln!(out, "{}", format_recipe_details_json(recipe)?)?;
    } else {
        write!(out, "{}", format_recipe_details_table(recipe, ctx.use_colors))?;
    }
    Ok(())
}

/// Runs the session until `quit` or end of input.
///
/// At end of input any outstanding request is still waited for, so piped
/// scripts see their last result.
async fn run<S, R, W>(
    session: &mut Session<S>,
    ctx: &CommandContext,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: RecipeSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    session.sync();
    render_list(session, ctx, out)?;
    out.flush()?;

    loop {
        tokio::select! {
            biased;

            settled = session.next_settled(), if session.is_pending() => {
                if let Some(settled) = settled {
                    session.settle(settled);
                }
                if !session.is_pending() {
                    render_list(session, ctx, out)?;
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    session.run_until_idle().await;
                    render_list(session, ctx, out)?;
                    break;
                };
                match handle_line(session, &line) {
                    Reaction::Quit => break,
                    Reaction::List => render_list(session, ctx, out)?,
                    Reaction::Detail => render_detail(session, ctx, out)?,
                    Reaction::Message(message) => writeln!(out, "{}", message.trim_end())?,
                    Reaction::Nothing => {}
                }
            }
        }
        out.flush()?;
    }

    out.flush()?;
    Ok(())
}

/// Builds the starting browser from command-line filters.
fn initial_browser(settings: &Settings, opts: &BrowseOptions) -> Result<Browser> {
    let limit = opts.query.limit.unwrap_or(settings.page_size);
    let mut browser = Browser::new(opts.trigger, limit);
    let inputs = opts.query.filter_inputs();
    for field in FilterField::ALL {
        browser.dispatch(Action::SetFilter(field, inputs.get(field).to_string()))?;
    }
    // Filters given on the command line count as applied.
    browser.dispatch(Action::Apply)?;
    Ok(browser)
}

/// Executes the browse command on stdin and stdout.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails. Request
/// failures are shown in the session and do not end it.
pub async fn execute(
    ctx: &CommandContext,
    settings: &Settings,
    client: RecipeClient,
    opts: &BrowseOptions,
) -> Result<()> {
    let browser = initial_browser(settings, opts)?;
    let mut session = Session::new(browser, client);
    if !ctx.quiet && !ctx.json_output {
        eprintln!("Type 'help' for commands, 'quit' to leave.");
    }

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    run(&mut session, ctx, input, &mut out).await
}
