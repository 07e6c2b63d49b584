//! HTTP error response handling for the API
//!
//! This module provides conversions from domain errors to HTTP responses
//! with appropriate status codes and JSON error bodies.

use crate::error::{ApiError, Error, ToHttpStatus};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Implement IntoResponse for Error to automatically convert errors to HTTP responses
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let api_error: ApiError = self.into();

        (status_code, Json(api_error)).into_response()
    }
}

/// Implement IntoResponse for ApiError for explicit error responses
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Default to 500 if we're directly converting an ApiError
        // (usually errors go through Error::into_response which has the status code)
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_maps_to_bad_request() {
        let error = Error::config("postCount must be at least 1", "postCount");
        assert_eq!(error.status_code(), 400);
        assert_eq!(error.error_code(), "config_error");
    }

    #[test]
    fn test_empty_result_maps_to_not_found() {
        let error = Error::EmptyResult;
        assert_eq!(error.status_code(), 404);
        assert_eq!(error.error_code(), "empty_result");
    }

    #[test]
    fn test_upstream_failures_map_to_bad_gateway() {
        assert_eq!(Error::RateLimited.status_code(), 502);
        assert_eq!(Error::Blocked.status_code(), 502);
        assert_eq!(Error::UpstreamStatus { status: 418 }.status_code(), 502);
    }

    #[test]
    fn test_error_to_api_error_carries_key_details() {
        let error = Error::config("subreddit contains invalid characters", "subreddit");
        let api_error: ApiError = error.into();

        assert_eq!(api_error.error.code, "config_error");
        assert!(api_error.error.message.contains("invalid characters"));

        let details = api_error.error.details.unwrap();
        assert_eq!(details["key"], "subreddit");
    }

    #[tokio::test]
    async fn test_error_into_response() {
        let error = Error::config("skipCount exceeds the configured maximum", "skipCount");
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Extract and verify the JSON body
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let api_error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(api_error.error.code, "config_error");
        assert!(api_error.error.message.contains("skipCount"));
    }

    #[tokio::test]
    async fn test_upstream_status_into_response() {
        let error = Error::UpstreamStatus { status: 451 };
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let api_error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(api_error.error.code, "upstream_status");
        assert_eq!(api_error.error.details.as_ref().unwrap()["status"], 451);
    }
}
