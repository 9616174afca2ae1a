//! Error types for the recipe API client.

use std::fmt;

/// A specialized Result type for recipe API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the recipe API itself (non-success responses) or by
/// the transport underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP-level error with status code.
    Http { status: u16, message: String },
    /// Resource not found.
    NotFound { resource: String },
    /// Rate limit exceeded.
    RateLimit { retry_after: Option<u64> },
    /// The API rejected a query parameter (400/422).
    Validation { message: String },
    /// Network/connection error.
    Network { message: String },
    /// The response body did not match the expected shape.
    Decode { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP error {}: {}", status, message),
            ApiError::NotFound { resource } => write!(f, "{} not found", resource),
            ApiError::RateLimit { retry_after } => match retry_after {
                Some(secs) => write!(f, "Rate limited, retry after {} seconds", secs),
                None => write!(f, "Rate limited"),
            },
            ApiError::Validation { message } => write!(f, "Validation error: {}", message),
            ApiError::Network { message } => write!(f, "Network error: {}", message),
            ApiError::Decode { message } => write!(f, "Invalid response: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Returns the HTTP status code behind this error, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RateLimit { .. } => Some(429),
            _ => None,
        }
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::Network { .. } => 3,
            ApiError::RateLimit { .. } => 4,
            _ => 2,
        }
    }
}

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API answered with an error, or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Error raised by the underlying HTTP client that is not a plain
    /// connection failure (e.g. building the client).
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Returns the API error if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            Error::Http(_) => None,
        }
    }

    /// Returns the appropriate CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api(e) => e.exit_code(),
            Error::Http(_) => 3,
        }
    }
}
