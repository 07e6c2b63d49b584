//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`collect`] - Collection runs with streamed progress
//! - [`system`] - Health, limits, OpenAPI

use serde::Serialize;

mod collect;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use collect::*;
pub use system::*;

// ============================================================================
// Response Types (shared across handlers)
// ============================================================================

/// Response for GET /limits - request bounds and the defaults applied to
/// omitted request fields
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LimitsResponse {
    /// Upper bounds enforced on collection requests
    pub limits: crate::config::LimitsConfig,
    /// Values applied when optional request fields are omitted
    pub defaults: CollectionDefaults,
}

/// Defaults for omitted CollectionConfig fields
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDefaults {
    /// Default number of posts to collect
    pub post_count: usize,
    /// Default number of comments per post
    pub comments_per_post: usize,
    /// Default listing sort
    pub sort_mode: crate::types::SortMode,
    /// Default export shape
    pub export_mode: crate::types::ExportMode,
}

impl LimitsResponse {
    /// Build the response from the service configuration.
    pub(crate) fn from_config(config: &crate::config::Config) -> Self {
        Self {
            limits: config.limits.clone(),
            defaults: CollectionDefaults {
                post_count: crate::config::default_post_count(),
                comments_per_post: crate::config::default_comments_per_post(),
                sort_mode: crate::types::SortMode::default(),
                export_mode: crate::types::ExportMode::default(),
            },
        }
    }
}
