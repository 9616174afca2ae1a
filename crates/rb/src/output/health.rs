//! Health check formatting.

use owo_colors::OwoColorize;
use recipe_api_rs::models::HealthStatus;

/// Formats a health report as JSON.
pub fn format_health_json(
    health: &HealthStatus,
    api_base: &str,
) -> Result<String, serde_json::Error> {
    let output = serde_json::json!({
        "api_base": api_base,
        "status": health.status,
        "database": health.database,
        "total_recipes": health.total_recipes,
    });
    serde_json::to_string_pretty(&output)
}

/// Formats a health report for the terminal.
pub fn format_health_table(health: &HealthStatus, api_base: &str, use_colors: bool) -> String {
    let status = if use_colors {
        if health.is_ok() {
            health.status.green().to_string()
        } else {
            health.status.red().to_string()
        }
    } else {
        health.status.clone()
    };

    format!(
        "Service:  {}\nStatus:   {}\nDatabase: {}\nRecipes:  {}\n",
        api_base, status, health.database, health.total_recipes
    )
}
