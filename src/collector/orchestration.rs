//! Run lifecycle: validation, progress reporting, and terminal events.

use crate::config::CollectionConfig;
use crate::error::{Error, Result};
use crate::sink::{EventSink, NullSink};
use crate::types::{Event, ExportRecord};

use super::TextCollector;
use super::export;

/// Per-run counters threaded through the orchestrator.
#[derive(Debug, Default, Clone, Copy)]
struct RunStats {
    posts_found: usize,
    comments_collected: usize,
}

impl TextCollector {
    /// Run a collection end to end, streaming progress through `sink`.
    ///
    /// Emits exactly one terminal event: `complete` on success (carrying the
    /// full export payload) or `error` when the run fails after streaming
    /// has begun. The `Err` return is reserved for synchronous request
    /// validation; once events flow, failures surface on the sink instead.
    /// A disconnected sink aborts the run quietly without a terminal event,
    /// since nobody is left to receive one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the request fails validation.
    pub async fn run(&self, request: &CollectionConfig, sink: &dyn EventSink) -> Result<()> {
        request.validate(&self.config.limits)?;

        match self.execute(request, sink).await {
            Ok((message, data)) => {
                if sink.emit(Event::Complete { message, data }).await.is_err() {
                    tracing::info!("Event consumer disconnected before the final event");
                }
                Ok(())
            }
            Err(Error::StreamClosed) => {
                tracing::info!("Event consumer disconnected, run aborted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    subreddit = %request.subreddit,
                    "Collection run failed"
                );
                let event = Event::Error {
                    message: e.to_string(),
                };
                if sink.emit(event).await.is_err() {
                    tracing::info!("Event consumer disconnected before the final event");
                }
                Ok(())
            }
        }
    }

    /// Collect without streaming, returning the shaped export records.
    ///
    /// Convenience for library callers that only want the final payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid requests, any fetch error that
    /// aborts the listing walk, and [`Error::EmptyResult`] when the
    /// subreddit yields no qualifying posts.
    pub async fn collect(&self, request: &CollectionConfig) -> Result<Vec<ExportRecord>> {
        request.validate(&self.config.limits)?;
        let (_message, data) = self.execute(request, &NullSink).await?;
        Ok(data)
    }

    /// Shared pipeline behind [`run`](Self::run) and
    /// [`collect`](Self::collect): walk the listing, then fetch comments
    /// post by post, shaping records as they complete.
    async fn execute(
        &self,
        request: &CollectionConfig,
        sink: &dyn EventSink,
    ) -> Result<(String, Vec<ExportRecord>)> {
        let message = if request.skip_count > 0 {
            format!(
                "Fetching posts from r/{} (skipping first {})...",
                request.subreddit, request.skip_count
            )
        } else {
            format!("Fetching posts from r/{}...", request.subreddit)
        };
        sink.emit(Event::Progress {
            posts_found: 0,
            posts_processed: None,
            comments_collected: None,
            message,
        })
        .await?;

        let posts = self.collect_posts(request, sink).await?;
        if posts.is_empty() {
            return Err(Error::EmptyResult);
        }

        let mut stats = RunStats {
            posts_found: posts.len(),
            comments_collected: 0,
        };
        let total = posts.len();
        let mut records = Vec::with_capacity(total);

        for (index, post) in posts.into_iter().enumerate() {
            sink.emit(Event::Progress {
                posts_found: stats.posts_found,
                posts_processed: Some(index + 1),
                comments_collected: Some(stats.comments_collected),
                message: format!("Processing post {}/{}...", index + 1, total),
            })
            .await?;

            match self
                .collect_comments(&post.permalink, request.comments_per_post)
                .await
            {
                Ok(comments) => {
                    stats.comments_collected += comments.len();
                    records.push(export::shape(post, comments, request.export_mode));
                }
                Err(e) => {
                    tracing::warn!(
                        post_id = %post.id,
                        error = %e,
                        "Comment fetch failed, skipping post"
                    );
                }
            }

            // The delay applies on failure too: a request was attempted
            // either way, and the source rate-limits on request volume.
            tokio::time::sleep(self.config.collector.request_delay).await;
        }

        sink.emit(Event::Progress {
            posts_found: stats.posts_found,
            posts_processed: Some(total),
            comments_collected: Some(stats.comments_collected),
            message: "Finalizing...".to_string(),
        })
        .await?;

        let message = if stats.posts_found < request.post_count {
            format!(
                "Collection complete: found only {} of {} requested posts ({} comments).",
                stats.posts_found, request.post_count, stats.comments_collected
            )
        } else {
            format!(
                "Collection complete: {} posts, {} comments.",
                stats.posts_found, stats.comments_collected
            )
        };

        Ok((message, records))
    }
}
