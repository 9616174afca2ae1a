//! HTTP client wrapper for the recipe API.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{HealthStatus, PageResult, SearchParams};
use crate::retry::{
    execute_with_retry, network_error, RetryConfig, DEFAULT_INITIAL_BACKOFF_SECS,
    DEFAULT_MAX_BACKOFF_SECS, DEFAULT_MAX_RETRIES,
};

/// Default base URL of the recipe API (includes the `/api` prefix).
pub const BASE_URL: &str = "http://localhost:8000/api";

/// Path of the unfiltered listing endpoint.
pub const LIST_ENDPOINT: &str = "/recipes";

/// Path of the filtered search endpoint.
pub const SEARCH_ENDPOINT: &str = "/recipes/search";

/// Path of the health endpoint.
pub const HEALTH_ENDPOINT: &str = "/health";

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for [`RecipeClient`].
#[derive(Debug, Clone)]
pub struct RecipeClientBuilder {
    base_url: String,
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    request_timeout: Duration,
}

impl Default for RecipeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeClientBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_secs(DEFAULT_INITIAL_BACKOFF_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the base URL. A trailing slash is ignored.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets how many times a rate-limited request is retried.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the first backoff delay.
    pub fn initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Sets the upper bound for any backoff delay.
    pub fn max_backoff(mut self, backoff: Duration) -> Self {
        self.max_backoff = backoff;
        self
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<RecipeClient> {
        let http_client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;

        Ok(RecipeClient {
            http_client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            retry_config: RetryConfig {
                max_retries: self.max_retries,
                initial_backoff: self.initial_backoff,
                max_backoff: self.max_backoff,
            },
        })
    }
}

/// Client for the recipe listing, search and health endpoints.
#[derive(Clone, Debug)]
pub struct RecipeClient {
    http_client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl RecipeClient {
    /// Creates a client for the default base URL.
    pub fn new() -> Result<Self> {
        RecipeClientBuilder::new().build()
    }

    /// Creates a client for a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        RecipeClientBuilder::new().base_url(base_url).build()
    }

    /// Returns a builder for fine-grained configuration.
    pub fn builder() -> RecipeClientBuilder {
        RecipeClientBuilder::new()
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured retry count.
    pub fn max_retries(&self) -> u32 {
        self.retry_config.max_retries
    }

    /// Returns the configured initial backoff.
    pub fn initial_backoff(&self) -> Duration {
        self.retry_config.initial_backoff
    }

    /// Returns the configured maximum backoff.
    pub fn max_backoff(&self) -> Duration {
        self.retry_config.max_backoff
    }

    /// Performs a GET request with query parameters.
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path (e.g., "/recipes")
    /// * `query` - Anything serializable as a query string
    ///
    /// # Returns
    /// The deserialized response body.
    pub async fn get<T, Q>(&self, endpoint: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");

        let url = url.as_str();
        let http_client = &self.http_client;
        execute_with_retry(&self.retry_config, || async move {
            http_client
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(network_error)
        })
        .await
    }

    /// Fetches one page of the unfiltered listing.
    pub async fn list_recipes(&self, page: u32, limit: u32) -> Result<PageResult> {
        self.get(LIST_ENDPOINT, &[("page", page), ("limit", limit)])
            .await
    }

    /// Fetches one page of search results.
    pub async fn search_recipes(&self, params: &SearchParams) -> Result<PageResult> {
        self.get(SEARCH_ENDPOINT, params).await
    }

    /// Queries the health endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get(HEALTH_ENDPOINT, &[] as &[(&str, &str)]).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
