//! Response classification and 429 retries with exponential backoff.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{ApiError, Error, Result};

/// First backoff delay, in seconds.
pub(crate) const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;

/// Upper bound for any backoff delay, in seconds.
pub(crate) const DEFAULT_MAX_BACKOFF_SECS: u64 = 30;

/// Retries of a rate-limited request before giving up.
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;

/// Backoff schedule of a client.
#[derive(Clone, Debug)]
pub(crate) struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Cap on every delay.
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_secs(DEFAULT_INITIAL_BACKOFF_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
        }
    }
}

impl RetryConfig {
    /// Calculates the backoff duration for a retry attempt.
    ///
    /// A `Retry-After` value from a 429 response wins over the exponential
    /// schedule (`initial * 2^attempt`); both are capped at `max_backoff`.
    pub fn calculate_backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        if let Some(secs) = retry_after {
            return Duration::from_secs(secs).min(self.max_backoff);
        }
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

/// What to do with a response.
pub(crate) enum RetryDecision<T> {
    /// Decoded body of a successful response.
    Success(T),
    /// Rate limited; try again after a backoff.
    Retry { retry_after: Option<u64> },
}

/// Reads the `Retry-After` header as whole seconds.
fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}

/// Decodes a success, asks for a retry on 429 while retries remain, and
/// turns anything else into an error.
pub(crate) async fn handle_response_with_retry<T: DeserializeOwned>(
    response: reqwest::Response,
    attempt: u32,
    max_retries: u32,
) -> Result<RetryDecision<T>> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await.map_err(network_error)?;
        let body = serde_json::from_slice::<T>(&bytes).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })?;
        return Ok(RetryDecision::Success(body));
    }

    if status.as_u16() == 429 && attempt < max_retries {
        return Ok(RetryDecision::Retry {
            retry_after: retry_after_secs(&response),
        });
    }

    Err(parse_error_response(response).await)
}

/// Extracts a human-readable message from an error body.
///
/// The API answers errors as `{"detail": "..."}`, or for parameter
/// validation as `{"detail": [{"msg": "...", ...}, ...]}`. Anything else is
/// returned verbatim.
pub(crate) fn extract_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                body.trim().to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => body.trim().to_string(),
    }
}

/// Classifies a non-success response by status code.
pub(crate) async fn parse_error_response(response: reqwest::Response) -> Error {
    let status = response.status();
    let status_code = status.as_u16();
    let resource = response.url().path().to_string();
    let retry_after = retry_after_secs(&response);

    let body = response.text().await.unwrap_or_default();
    let message = extract_detail(&body);

    let api_error = match status_code {
        404 => ApiError::NotFound { resource },
        429 => ApiError::RateLimit { retry_after },
        400 | 422 => ApiError::Validation {
            message: if message.is_empty() {
                "Bad request".to_string()
            } else {
                message
            },
        },
        _ => ApiError::Http {
            status: status_code,
            message: if message.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                message
            },
        },
    };

    Error::Api(api_error)
}

/// Converts a transport failure into a network error.
pub(crate) fn network_error(e: reqwest::Error) -> Error {
    Error::Api(ApiError::Network {
        message: e.to_string(),
    })
}

/// Executes a request with retry logic.
///
/// Each attempt is a fresh future from `make_request`; dropping the returned
/// future (for example when a caller cancels it) also abandons any pending
/// backoff sleep.
pub(crate) async fn execute_with_retry<T, F, Fut>(
    config: &RetryConfig,
    mut make_request: F,
) -> Result<T>
where
    T: DeserializeOwned,
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response>>,
{
    for attempt in 0..=config.max_retries {
        let response = make_request().await?;

        match handle_response_with_retry(response, attempt, config.max_retries).await? {
            RetryDecision::Success(value) => return Ok(value),
            RetryDecision::Retry { retry_after } => {
                let backoff = config.calculate_backoff(attempt, retry_after);
                warn!(attempt, ?backoff, "rate limited, backing off");
                sleep(backoff).await;
            }
        }
    }

    debug!("retries exhausted");
    Err(Error::Api(ApiError::RateLimit { retry_after: None }))
}
