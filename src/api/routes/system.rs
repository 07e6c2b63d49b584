//! System handlers: health, limits, OpenAPI.

use crate::api::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use super::LimitsResponse;

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /limits - Request limits and defaults
#[utoipa::path(
    get,
    path = "/limits",
    tag = "system",
    responses(
        (status = 200, description = "Configured request bounds and the defaults for omitted fields", body = crate::api::routes::LimitsResponse)
    )
)]
pub async fn get_limits(State(state): State<AppState>) -> impl IntoResponse {
    Json(LimitsResponse::from_config(&state.config))
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3.1 specification in JSON format")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}
