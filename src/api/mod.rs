//! REST API server module
//!
//! Provides an OpenAPI 3.1 compliant REST API for running collections and
//! inspecting service limits, with collection progress streamed over SSE.

use crate::{Config, Result, TextCollector};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Collection
/// - `POST /collect` - Run a collection, streaming progress as SSE
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /limits` - Request limits and defaults
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled)
pub fn create_router(collector: TextCollector, config: Arc<Config>) -> Router {
    let state = AppState::new(collector, config.clone());

    // Build the router with all routes
    let router = Router::new()
        // Collection
        .route("/collect", post(routes::run_collection))
        // System
        .route("/health", get(routes::health_check))
        .route("/limits", get(routes::get_limits))
        .route("/openapi.json", get(routes::openapi_spec));

    // Merge Swagger UI routes if enabled in config (before applying state).
    // SwaggerUi serves its own copy of the spec under /api-docs so it does
    // not collide with the /openapi.json route defined above.
    let router = if config.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    // Add state to all routes
    let router = router.with_state(state);

    // Apply CORS middleware if enabled in config
    if config.api.cors_enabled {
        let cors = build_cors_layer(&config.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// # Arguments
///
/// * `origins` - List of allowed origins (supports "*" for any origin)
///
/// # Returns
///
/// A configured CorsLayer that allows the specified origins, all methods,
/// and all headers for cross-origin requests.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    // Check if "*" (all origins) is in the list
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        // Allow all origins (default for local development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow specific origins
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// This function creates a TCP listener, binds it to the configured address,
/// and starts serving the API router. It runs until the server is shut down.
///
/// # Arguments
///
/// * `collector` - TextCollector instance to handle collection requests
/// * `config` - Arc-wrapped Config containing API configuration
///
/// # Errors
///
/// Returns [`crate::Error::Io`] when the listener cannot bind and
/// [`crate::Error::ApiServerError`] when the server exits abnormally.
///
/// # Example
///
/// ```no_run
/// use subtext_dl::{Config, TextCollector};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let collector = TextCollector::new((*config).clone())?;
///
/// // Start API server (blocks until shutdown)
/// subtext_dl::api::start_api_server(collector, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(collector: TextCollector, config: Arc<Config>) -> Result<()> {
    let bind_address = config.api.bind_address;

    tracing::info!(
        address = %bind_address,
        "Starting API server"
    );

    // Create the router with all routes
    let app = create_router(collector, config);

    // Bind TCP listener to the configured address
    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %bind_address,
        "API server listening"
    );

    // Serve the API using the listener
    axum::serve(listener, app.into_make_service())
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
