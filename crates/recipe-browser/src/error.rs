//! Error types for the browser controller.

use crate::filter::FilterError;
use crate::pagination::PAGE_SIZES;

/// Errors returned by browser state transitions.
///
/// None of these leave the browser in a broken state: the rejected input is
/// simply not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrowserError {
    /// A page size outside the fixed choices.
    #[error("invalid page size {size}, expected one of {}", format_sizes())]
    InvalidPageSize {
        /// The rejected size.
        size: u32,
    },

    /// A row index that is not on the current page.
    #[error("no row {row} on this page ({rows} rows shown)")]
    NoSuchRow {
        /// The 1-based row that was requested.
        row: usize,
        /// Number of rows currently shown.
        rows: usize,
    },

    /// A recipe id that is not on the current page.
    #[error("recipe {id} is not on the current page")]
    NoSuchRecipe {
        /// The requested recipe id.
        id: u64,
    },

    /// An unrecognized trigger policy name.
    #[error("invalid trigger policy '{value}', expected 'immediate' or 'explicit'")]
    InvalidTrigger {
        /// The rejected value.
        value: String,
    },

    /// A filter field could not be resolved.
    #[error(transparent)]
    Filter(#[from] FilterError),
}

fn format_sizes() -> String {
    PAGE_SIZES
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

/// A failed fetch as shown to the user.
///
/// Keeps the human-readable message and, for HTTP failures, the status code.
/// The underlying error is logged when the failure is recorded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchFailure {
    message: String,
    status: Option<u16>,
}

impl FetchFailure {
    /// Creates a failure with the given message and no status.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// The message to display.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl From<&recipe_api_rs::error::Error> for FetchFailure {
    fn from(err: &recipe_api_rs::error::Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.as_api_error().and_then(|e| e.status()),
        }
    }
}

impl From<recipe_api_rs::error::Error> for FetchFailure {
    fn from(err: recipe_api_rs::error::Error) -> Self {
        FetchFailure::from(&err)
    }
}
