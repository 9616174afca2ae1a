//! Error types for filter field handling.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur when naming filter fields.
///
/// Filter *values* never fail locally; only field names are checked.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The name does not refer to any filter field.
    #[error("unknown filter field: {name} (expected title, cuisine, rating, total_time or calories)")]
    UnknownField {
        /// The unrecognized field name.
        name: String,
    },
}

impl FilterError {
    /// Creates an unknown field error.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        FilterError::UnknownField { name: name.into() }
    }
}
