//! Error types for subtext-dl
//!
//! This module provides comprehensive error handling for the library, including:
//! - Domain-specific error types (Config, RateLimited, Blocked, etc.)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes
//! - Retryability classification used by the fetch layer

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for subtext-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for subtext-dl
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration or request key that caused the error (e.g., "postCount")
        key: Option<String>,
    },

    /// Reddit rate limited the request and the retry budget is exhausted
    #[error("rate limited by Reddit after exhausting retries")]
    RateLimited,

    /// Reddit refused the request outright (HTTP 403), usually IP reputation
    #[error("access blocked by Reddit (HTTP 403)")]
    Blocked,

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Reddit answered with a status code the fetcher does not handle
    #[error("unexpected HTTP status {status} from Reddit")]
    UpstreamStatus {
        /// The HTTP status code Reddit returned
        status: u16,
    },

    /// A collection run ended with zero qualifying posts
    #[error("No text posts found in this subreddit.")]
    EmptyResult,

    /// The event consumer disconnected while a run was still producing events
    #[error("event stream closed: consumer disconnected")]
    StreamClosed,

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

impl Error {
    /// Create a configuration error tied to a specific key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Whether retrying the same request can reasonably succeed
    ///
    /// Rate limiting, transport failures, and upstream 5xx responses are
    /// transient. Blocks, client-side 4xx statuses, and bad input are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimited | Error::Network(_) => true,
            Error::UpstreamStatus { status } => *status >= 500,
            _ => false,
        }
    }
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
/// It follows a standard format with machine-readable error codes,
/// human-readable messages, and optional contextual details.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "config_error",
///     "message": "configuration error: postCount must be between 1 and 1000",
///     "details": {
///       "key": "postCount"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "config_error", "rate_limited")
    ///
    /// Clients can use this for programmatic error handling.
    pub code: String,

    /// Human-readable error message
    ///
    /// This is suitable for displaying to end users.
    pub message: String,

    /// Optional additional context about the error
    ///
    /// This can include fields like the offending request key or the
    /// upstream HTTP status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,

            // 404 Not Found - The subreddit had nothing to collect
            Error::EmptyResult => 404,

            // 502 Bad Gateway - Upstream (Reddit) errors
            Error::RateLimited => 502,
            Error::Blocked => 502,
            Error::Network(_) => 502,
            Error::UpstreamStatus { .. } => 502,

            // 500 Internal Server Error - Server-side issues
            Error::StreamClosed => 500,
            Error::Serialization(_) => 500,
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::RateLimited => "rate_limited",
            Error::Blocked => "blocked",
            Error::Network(_) => "network_error",
            Error::UpstreamStatus { .. } => "upstream_status",
            Error::EmptyResult => "empty_result",
            Error::StreamClosed => "stream_closed",
            Error::Serialization(_) => "serialization_error",
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::UpstreamStatus { status } => Some(serde_json::json!({
                "status": status,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
