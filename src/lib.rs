//! # subtext-dl
//!
//! Backend library for collecting text posts and their top comments from
//! subreddits, for building discussion datasets.
//!
//! ## Design Philosophy
//!
//! subtext-dl is designed to be:
//! - **Respectful by default** - Paced requests, retry with backoff, mirror fallback
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers stream typed progress events, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use subtext_dl::{CollectionConfig, Config, Event, TextCollector};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let collector = TextCollector::new(Config::default())?;
//!
//!     let mut request = CollectionConfig::new("AskHistorians");
//!     request.post_count = 25;
//!     request.comments_per_post = 10;
//!
//!     // Watch progress while the run executes
//!     let (tx, mut rx) = tokio::sync::mpsc::channel::<Event>(16);
//!     tokio::spawn(async move {
//!         while let Some(event) = rx.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     collector.run(&request, &tx).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Core collection pipeline (decomposed into focused submodules)
pub mod collector;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTTP fetching with retry and mirror fallback
pub mod fetch;
/// Media post detection
pub mod filter;
/// Reddit listing payload decoding
pub mod reddit;
/// Event sink abstraction for progress streaming
pub mod sink;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use collector::TextCollector;
pub use config::{CollectionConfig, Config};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use sink::{EventSink, NullSink, SinkClosed};
pub use types::{Comment, Event, ExportMode, ExportRecord, FlatRecord, Post, SortMode};

/// Run the API server with graceful signal handling.
///
/// Serves the REST API until a termination signal arrives, then returns.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Errors
///
/// Returns whatever [`api::start_api_server`] fails with: an I/O error when
/// the listener cannot bind, or a server error if serving stops abnormally.
///
/// # Example
///
/// ```no_run
/// use subtext_dl::{Config, TextCollector, run_with_shutdown};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Arc::new(Config::default());
///     let collector = TextCollector::new((*config).clone())?;
///
///     // Serve with automatic signal handling
///     run_with_shutdown(collector, config).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(
    collector: TextCollector,
    config: std::sync::Arc<Config>,
) -> Result<()> {
    tokio::select! {
        result = api::start_api_server(collector, config) => result,
        () = wait_for_signal() => {
            tracing::info!("Shutting down");
            Ok(())
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
