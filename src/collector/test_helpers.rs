//! Shared test helpers for driving collectors against a mock Reddit server.

use crate::collector::TextCollector;
use crate::config::{CollectionConfig, Config};
use crate::sink::{EventSink, SinkClosed};
use crate::types::Event;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::time::Duration;

/// Event sink that records everything emitted, for sequence assertions.
#[derive(Debug, Default)]
pub(crate) struct CollectingSink {
    events: Mutex<Vec<Event>>,
}

impl CollectingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event emitted so far, in order.
    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for CollectingSink {
    async fn emit(&self, event: Event) -> Result<(), SinkClosed> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Sink that accepts a fixed number of events and then reports the
/// consumer as gone, for disconnect-handling tests.
#[derive(Debug)]
pub(crate) struct ClosingSink {
    remaining: Mutex<usize>,
}

impl ClosingSink {
    /// Accept `accept` events before failing every emission.
    pub(crate) fn after(accept: usize) -> Self {
        Self {
            remaining: Mutex::new(accept),
        }
    }
}

#[async_trait]
impl EventSink for ClosingSink {
    async fn emit(&self, _event: Event) -> Result<(), SinkClosed> {
        let mut remaining = self.remaining.lock().unwrap();
        if *remaining == 0 {
            return Err(SinkClosed);
        }
        *remaining -= 1;
        Ok(())
    }
}

/// Service config pointed at a mock server, with millisecond delays so
/// retry and pacing tests stay fast.
pub(crate) fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.fetch.base_url = base_url.to_string();
    config.fetch.mirror_url = None;
    config.fetch.retries = 1;
    config.fetch.rate_limit_backoff = Duration::from_millis(20);
    config.fetch.retry_delay = Duration::from_millis(5);
    config.collector.request_delay = Duration::from_millis(1);
    config
}

/// Collector wired to a mock server via [`test_config`].
pub(crate) fn test_collector(base_url: &str) -> TextCollector {
    TextCollector::new(test_config(base_url)).unwrap()
}

/// Request against the standard test subreddit.
pub(crate) fn test_request(post_count: usize) -> CollectionConfig {
    let mut request = CollectionConfig::new("testsub");
    request.post_count = post_count;
    request.comments_per_post = 5;
    request
}

/// A text post thing for listing payloads.
pub(crate) fn text_post(id: &str, title: &str) -> Value {
    json!({
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
pub(crate) fn image_post(id: &str) -> Value {
    json!({
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
pub(crate) fn listing(children: Vec<Value>, after: Option<&str>) -> Value {
    json!({
        "kind": "Listing",
        "data": {
            "after": after,
            "children": children
        }
    })
}

/// A comment thing for comment-listing payloads.
pub(crate) fn comment(id: &str, body: &str, score: i64) -> Value {
    json!({
        "kind": "t1",
        "data": {
            "id": id,
            "body": body,
            "score": score
        }
    })
}

/// The two-segment response Reddit serves for `{permalink}.json`: the post
/// listing first, the comment listing second.
pub(crate) fn comment_response(comments: Vec<Value>) -> Value {
    json!([
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
