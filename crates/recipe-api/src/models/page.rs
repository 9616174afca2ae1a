//! Paged responses and request parameters.

use serde::{Deserialize, Serialize};

use super::Recipe;

/// One page of recipes from the listing or search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// The page that was served (1-based).
    pub page: u32,

    /// Page size used by the server.
    pub limit: u32,

    /// Number of recipes matching the query, independent of `limit`.
    #[serde(default)]
    pub total: u64,

    /// Page count as reported by the server. Not every endpoint sends it;
    /// use [`PageResult::page_count`] instead of reading this directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,

    /// The recipes on this page, in server order.
    #[serde(default)]
    pub data: Vec<Recipe>,
}

impl PageResult {
    /// Returns the number of pages, at least 1.
    ///
    /// Always derived from `total` and `limit`; a server-provided
    /// `total_pages` is ignored because it reports 0 for an empty result.
    pub fn page_count(&self) -> u32 {
        page_count(self.total, self.limit)
    }
}

/// Computes `max(1, ceil(total / limit))`.
///
/// A zero `limit` is treated as a single page.
pub fn page_count(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Query parameters for the search endpoint.
///
/// Absent fields are omitted from the query string entirely. Comparison
/// fields (`rating`, `total_time`, `calories`) carry the operator inline,
/// e.g. `">=4.5"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl SearchParams {
    /// Creates parameters for the given page with no filters.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }
}

/// Response of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"ok"` or `"error"`.
    pub status: String,

    /// Database connectivity description.
    pub database: String,

    /// Number of recipes in the catalog.
    #[serde(default)]
    pub total_recipes: u64,
}

impl HealthStatus {
    /// Returns true if the service reports itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
