//! Common test utilities for subtext-dl integration tests.

// Each integration test binary compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use subtext_dl::{Config, TextCollector};
use tokio::net::TcpListener;

/// A running API server bound to an ephemeral port.
pub struct TestApp {
    pub addr: SocketAddr,
}

impl TestApp {
    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Spawn the API server on an OS-assigned port and return its address.
pub async fn spawn_app(config: Config) -> TestApp {
    let collector = TextCollector::new(config.clone()).unwrap();
    let router = subtext_dl::api::create_router(collector, Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service()).await.ok();
    });

    TestApp { addr }
}

/// Service config pointed at a mock Reddit server, with millisecond delays
/// so paced-walk tests stay fast.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.fetch.base_url = base_url.to_string();
    config.fetch.mirror_url = None;
    config.fetch.retries = 1;
    config.fetch.rate_limit_backoff = Duration::from_millis(30);
    config.fetch.retry_delay = Duration::from_millis(5);
    config.collector.request_delay = Duration::from_millis(1);
    config
}

/// One parsed SSE frame: the event name plus its decoded JSON payload.
#[derive(Debug)]
pub struct SseFrame {
    pub event: String,
    pub data: serde_json::Value,
}

/// Parse a raw SSE response body into frames.
///
/// Keep-alive comment lines (leading `:`) and unknown fields are ignored;
/// multi-line `data:` fields are joined with newlines per the SSE spec.
pub fn parse_sse(body: &str) -> Vec<SseFrame> {
    let mut frames = Vec::new();
    for block in body.split("\n\n") {
        let mut event = None;
        let mut data = String::new();
        for line in block.lines() {
            if let Some(rest) = line.strip_prefix("event: ") {
                event = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix("data: ") {
                if !data.is_empty() {
                    data.push('\n');
                }
                data.push_str(rest);
            }
        }
        if let Some(event) = event {
            frames.push(SseFrame {
                event,
                data: serde_json::from_str(&data).unwrap_or(serde_json::Value::Null),
            });
        }
    }
    frames
}

// ----------------------------------------------------------------------------
// Reddit payload builders
// ----------------------------------------------------------------------------

/// A text post thing for listing payloads.
pub fn text_post(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "t3",
        "data": {
            "id": id,
            "title": title,
            "selftext": format!("body of {id}"),
            "permalink": format!("/r/testsub/comments/{id}/slug/"),
            "url": format!("https://www.reddit.com/r/testsub/comments/{id}/slug/"),
            "created_utc": 1_700_000_000.0,
            "score": 42
        }
    })
}

/// An image post thing that the media filter should drop.
pub fn image_post(id: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "t3",
        "data": {
            "id": id,
            "title": format!("image {id}"),
            "selftext": "",
            "permalink": format!("/r/testsub/comments/{id}/slug/"),
            "url": format!("https://i.redd.it/{id}.jpg"),
            "created_utc": 1_700_000_000.0,
            "score": 10,
            "post_hint": "image"
        }
    })
}

/// A listing page wrapping `children`, with an optional next-page cursor.
pub fn listing(children: Vec<serde_json::Value>, after: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "kind": "Listing",
        "data": {
            "after": after,
            "children": children
        }
    })
}

/// A comment thing for comment-listing payloads.
pub fn comment(id: &str, body: &str, score: i64) -> serde_json::Value {
    serde_json::json!({
        "kind": "t1",
        "data": {
            "id": id,
            "body": body,
            "score": score
        }
    })
}

/// The two-segment response Reddit serves for `{permalink}.json`.
pub fn comment_response(comments: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!([
        {
            "kind": "Listing",
            "data": { "after": null, "children": [] }
        },
        {
            "kind": "Listing",
            "data": { "after": null, "children": comments }
        }
    ])
}
