//! Show command implementation.
//!
//! Displays the detail panel for one row of a page.

use recipe_api_rs::client::RecipeClient;

use super::list::load_page;
use super::{CommandContext, Result, Settings};
use crate::cli::QueryArgs;
use crate::output::{format_recipe_details_json, format_recipe_details_table};

/// Options for the show command.
#[derive(Debug, Clone)]
pub struct ShowOptions {
    /// 1-based row on the page.
    pub row: usize,
    /// Filters and page the row refers to.
    pub query: QueryArgs,
}

/// Executes the show command.
///
/// # Errors
///
/// Returns an error if the request fails or the page has no such row.
pub async fn execute(
    ctx: &CommandContext,
    settings: &Settings,
    client: RecipeClient,
    opts: &ShowOptions,
) -> Result<()> {
    let session = load_page(settings, client, &opts.query).await?;
    let recipe = session.browser().view().row(opts.row)?;

    if ctx.json_output {
        println!("{}", format_recipe_details_json(recipe)?);
    } else if !ctx.quiet {
        print!("{}", format_recipe_details_table(recipe, ctx.use_colors));
    }

    Ok(())
}
