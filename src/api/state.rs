//! Application state for the API server

use crate::{Config, TextCollector};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clone) and provides
/// access to the collector instance and configuration.
#[derive(Clone)]
pub struct AppState {
    /// The main TextCollector instance
    pub collector: TextCollector,

    /// Configuration (read access for handlers)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(collector: TextCollector, config: Arc<Config>) -> Self {
        Self { collector, config }
    }
}
