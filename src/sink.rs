//! Event delivery traits
//!
//! A collection run reports progress through an [`EventSink`] rather than a
//! concrete channel, so the same engine serves the SSE endpoint, library
//! embedders with their own transports, and tests that record events.

use async_trait::async_trait;

use crate::error::Error;
use crate::types::Event;

/// Returned by [`EventSink::emit`] when the consumer has gone away
///
/// The collector treats this as a cancellation signal: the run stops before
/// issuing further upstream requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

impl std::fmt::Display for SinkClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event sink closed")
    }
}

impl std::error::Error for SinkClosed {}

impl From<SinkClosed> for Error {
    fn from(_: SinkClosed) -> Self {
        Error::StreamClosed
    }
}

/// Destination for the events of a collection run
///
/// Implementations decide what delivery means: buffering into a channel,
/// writing to a socket, or discarding. `emit` may apply backpressure by
/// awaiting until the consumer is ready.
///
/// # Examples
///
/// ```no_run
/// use subtext_dl::{CollectionConfig, Config, Event, EventSink, TextCollector};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let collector = TextCollector::new(Config::default())?;
/// let (tx, mut rx) = tokio::sync::mpsc::channel::<Event>(16);
///
/// tokio::spawn(async move {
///     while let Some(event) = rx.recv().await {
///         println!("{}", serde_json::to_string(&event).unwrap_or_default());
///     }
/// });
///
/// let request = CollectionConfig::new("AskReddit");
/// collector.run(&request, &tx).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event to the consumer
    ///
    /// # Errors
    ///
    /// Returns [`SinkClosed`] when the consumer is no longer listening. The
    /// caller must stop producing events for this run.
    async fn emit(&self, event: Event) -> Result<(), SinkClosed>;
}

#[async_trait]
impl EventSink for tokio::sync::mpsc::Sender<Event> {
    async fn emit(&self, event: Event) -> Result<(), SinkClosed> {
        self.send(event).await.map_err(|_| SinkClosed)
    }
}

/// Sink that discards every event
///
/// Used by [`TextCollector::collect`](crate::TextCollector::collect), where
/// the caller only wants the final records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn emit(&self, _event: Event) -> Result<(), SinkClosed> {
        Ok(())
    }
}
