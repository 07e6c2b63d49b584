//! Collection handler: runs the pipeline and streams its events.

use crate::api::AppState;
use crate::config::CollectionConfig;
use crate::types::Event;
use axum::{
    Json,
    extract::State,
    response::{
        IntoResponse, Response,
        sse::{Event as SseEvent, KeepAlive, Sse},
    },
};
use std::convert::Infallible;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

/// Buffered events between the pipeline and the SSE writer. The pipeline
/// paces itself with inter-request delays, so a small buffer suffices; a
/// consumer that stops reading closes the channel and aborts the run.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// POST /collect - Run a collection, streaming progress as SSE
///
/// The request is validated up front: invalid input is rejected with a
/// plain 400 JSON body before any streaming begins. A valid request opens
/// a `text/event-stream` response carrying one SSE event per pipeline
/// event, terminated by a single `complete` or `error` event.
#[utoipa::path(
    post,
    path = "/collect",
    tag = "collect",
    request_body = CollectionConfig,
    responses(
        (status = 200, description = "Server-sent event stream of progress events, ending in one complete or error event (text/event-stream)", content_type = "text/event-stream"),
        (status = 400, description = "Invalid collection request", body = crate::error::ApiError)
    )
)]
pub async fn run_collection(
    State(state): State<AppState>,
    Json(request): Json<CollectionConfig>,
) -> Response {
    if let Err(e) = request.validate(&state.config.limits) {
        return e.into_response();
    }

    let (tx, rx) = tokio::sync::mpsc::channel::<Event>(EVENT_CHANNEL_CAPACITY);

    let collector = state.collector.clone();
    tokio::spawn(async move {
        // Validation already passed, so run() only errors if the request
        // mutated under us; log it rather than lose it.
        if let Err(e) = collector.run(&request, &tx).await {
            tracing::error!(error = %e, "Collection task failed to start");
        }
    });

    let sse_stream = ReceiverStream::new(rx).filter_map(|event| {
        let event_type = match &event {
            Event::Progress { .. } => "progress",
            Event::Complete { .. } => "complete",
            Event::Error { .. } => "error",
        };

        match serde_json::to_string(&event) {
            Ok(json_data) => {
                Some(Ok::<_, Infallible>(
                    SseEvent::default().event(event_type).data(json_data),
                ))
            }
            Err(e) => {
                tracing::warn!("Failed to serialize event to JSON: {}", e);
                None
            }
        }
    });

    Sse::new(sse_stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}
