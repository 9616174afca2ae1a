//! Output formatting utilities for the rb CLI.
//!
//! This module provides functions for formatting data as tables or JSON:
//!
//! - [`recipes`] - Recipe list, pager and detail formatting
//! - [`health`] - Service health formatting
//! - [`helpers`] - Common formatting utilities (truncation, stars, placeholders)

mod health;
pub mod helpers;
mod recipes;

pub use health::{format_health_json, format_health_table};
pub use recipes::{
    format_filter_summary, format_pager, format_recipe_details_json, format_recipe_details_table,
    format_recipes_json, format_recipes_table,
};
