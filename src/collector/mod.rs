//! Core collection pipeline split into focused submodules.
//!
//! The `TextCollector` struct and its methods are organized by stage:
//! - [`posts`] - Paginated listing walk and media filtering
//! - [`comments`] - Per-post top-level comment retrieval
//! - [`orchestration`] - Run lifecycle, progress events, and terminal reporting
//! - [`export`] - Shaping collected data into export records

mod comments;
mod export;
mod orchestration;
mod posts;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::HttpFetcher;
use std::sync::Arc;

/// Main collector instance (cloneable - all fields are Arc-wrapped).
///
/// One `TextCollector` serves any number of collection runs; each run keeps
/// its state local, so clones can drive concurrent requests safely.
#[derive(Clone)]
pub struct TextCollector {
    /// HTTP fetcher shared across listing and comment requests
    pub(crate) fetcher: Arc<HttpFetcher>,
    /// Service configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
}

impl TextCollector {
    /// Create a new collector from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] when the configuration is invalid
    /// and [`crate::Error::Network`] when the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(config.fetch.clone())?;

        Ok(Self {
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
        })
    }

    /// The configuration this collector was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
