//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use recipe_api_rs::prelude::*;
//!
//! // Now you have access to:
//! // - RecipeClient, RecipeClientBuilder (API client)
//! // - Error, ApiError, Result (error handling)
//! // - Recipe, Nutrients, PageResult, SearchParams, HealthStatus (data models)
//! ```

// Client types
pub use crate::client::{RecipeClient, RecipeClientBuilder};

// Error types
pub use crate::error::{ApiError, Error, Result};

// Data models
pub use crate::models::{
    page_count, HealthStatus, Nutrients, PageResult, Recipe, SearchParams, NUTRIENT_KEYS,
};
