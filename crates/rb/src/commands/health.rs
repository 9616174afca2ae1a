//! Health command implementation.

use recipe_api_rs::client::RecipeClient;

use super::{CommandContext, Result};
use crate::output::{format_health_json, format_health_table};

/// Executes the health command.
///
/// An unhealthy report is still printed; only a failed request is an error.
///
/// # Errors
///
/// Returns an error if the service cannot be reached.
pub async fn execute(ctx: &CommandContext, client: &RecipeClient) -> Result<()> {
    let health = client.health().await?;

    if ctx.json_output {
        println!("{}", format_health_json(&health, client.base_url())?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_health_table(&health, client.base_url(), ctx.use_colors)
        );
    }

    Ok(())
}
