//! Recipe API client library
//!
//! Typed access to the recipe catalog service: the unfiltered listing
//! endpoint, the filtered search endpoint and the health check.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use recipe_api_rs::prelude::*;
//! ```
//!
//! This re-exports [`RecipeClient`](client::RecipeClient), the error types
//! and the data models.

pub mod client;
pub mod error;
pub mod models;
pub mod prelude;
mod retry;
