//! HTTP layer for Reddit's public JSON endpoints.
//!
//! Reddit serves every listing and comment thread as plain JSON when `.json`
//! is appended to the path, but it aggressively rate-limits and sometimes
//! blocks non-browser clients. [`HttpFetcher`] wraps a shared [`reqwest`]
//! client with the retry and fallback policy the collector relies on:
//!
//! - every request carries a browser-like `User-Agent`,
//! - HTTP 429 responses are retried with a linearly growing backoff,
//! - transient failures (network errors, 5xx) are retried after a fixed delay,
//! - when the primary host exhausts its attempts, the mirror host (by default
//!   `old.reddit.com`) gets its own full attempt budget.
//!
//! HTTP 403 means Reddit has blocked the client outright. Retrying the same
//! host would only prolong the block, so 403 fails the host immediately and
//! moves on to the mirror.

use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// HTTP client for Reddit's JSON endpoints with retry and mirror fallback.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a fetcher from the given configuration.
    ///
    /// Validates the configuration and builds the underlying HTTP client
    /// with the configured user agent and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration is invalid and
    /// [`Error::Network`] when the HTTP client cannot be constructed.
    pub fn new(config: FetchConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch a JSON document from Reddit.
    ///
    /// `path` is appended to the configured base URL (for example
    /// `/r/rust/top.json?limit=100`). The primary host is tried first with
    /// the full retry budget; if it fails for any reason and a mirror host
    /// is configured, the mirror gets its own full budget before the error
    /// is surfaced.
    ///
    /// # Errors
    ///
    /// Returns the mirror's error (or the primary's, when no mirror is
    /// configured) once both hosts have exhausted their attempts.
    pub async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
        match self.fetch_from_host(&self.config.base_url, path).await {
            Ok(value) => Ok(value),
            Err(primary_error) => match &self.config.mirror_url {
                Some(mirror) => {
                    tracing::warn!(
                        error = %primary_error,
                        mirror = %mirror,
                        "Primary host failed, trying mirror"
                    );
                    self.fetch_from_host(mirror, path).await
                }
                None => Err(primary_error),
            },
        }
    }

    /// Fetch `path` from a single host, retrying transient failures.
    ///
    /// Rate limiting (HTTP 429) backs off linearly: the first retry waits
    /// one `rate_limit_backoff`, the second waits two, and so on. Other
    /// retryable failures wait a fixed `retry_delay`. Non-retryable errors
    /// (403, other 4xx) fail the host immediately.
    async fn fetch_from_host(&self, host: &str, path: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", host.trim_end_matches('/'), path);
        let mut attempt: u32 = 0;

        loop {
            match self.request(&url).await {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::debug!(
                            url = %url,
                            attempts = attempt + 1,
                            "Request succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt < self.config.retries => {
                    attempt += 1;
                    let delay = match &e {
                        Error::RateLimited => self.config.rate_limit_backoff * attempt,
                        _ => self.config.retry_delay,
                    };
                    tracing::warn!(
                        error = %e,
                        url = %url,
                        attempt = attempt,
                        max_attempts = self.config.retries + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, url = %url, "Request failed");
                    return Err(e);
                }
            }
        }
    }

    /// Perform a single request and classify the response.
    async fn request(&self, url: &str) -> Result<serde_json::Value> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        match status {
            429 => Err(Error::RateLimited),
            403 => Err(Error::Blocked),
            200..=299 => Ok(response.json().await?),
            _ => Err(Error::UpstreamStatus { status }),
        }
    }
}
