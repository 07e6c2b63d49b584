//! Paginated subreddit listing walk.

use crate::config::CollectionConfig;
use crate::error::Result;
use crate::filter;
use crate::reddit::Listing;
use crate::sink::EventSink;
use crate::types::{Event, Post, SortMode};

use super::TextCollector;

impl TextCollector {
    /// Walk the subreddit listing until enough text posts accumulate.
    ///
    /// Follows the `after` cursor page by page, dropping media posts and
    /// accumulating the rest until `skip_count + post_count` are in hand.
    /// Each accumulated post emits a progress event; posts inside the skip
    /// window report zero found. The walk stops early when the listing is
    /// exhausted (empty page or missing cursor) or when the page fetch cap
    /// is reached, so the result may be shorter than requested.
    ///
    /// Returns the accumulated posts sliced past the skip window.
    pub(crate) async fn collect_posts(
        &self,
        request: &CollectionConfig,
        sink: &dyn EventSink,
    ) -> Result<Vec<Post>> {
        let wanted = request.skip_count + request.post_count;
        let mut collected: Vec<Post> = Vec::with_capacity(wanted);
        let mut cursor: Option<String> = None;
        let mut pages_fetched: u32 = 0;

        while collected.len() < wanted {
            if pages_fetched >= self.config.collector.max_page_fetches {
                tracing::warn!(
                    pages_fetched,
                    accumulated = collected.len(),
                    "Page fetch cap reached, stopping listing walk"
                );
                break;
            }

            let path = listing_path(request, self.config.collector.page_size, cursor.as_deref());
            let page = self.fetcher.fetch_json(&path).await?;
            pages_fetched += 1;

            let listing = Listing::from_value(page);
            let next_cursor = listing.data.after.clone();
            let raw_posts = listing.posts();

            if raw_posts.is_empty() {
                tracing::debug!(pages_fetched, "Listing page had no posts, stopping");
                break;
            }

            for raw in raw_posts {
                if filter::is_media(&raw) {
                    continue;
                }
                collected.push(raw.into_post());

                let accumulated = collected.len();
                let event = if accumulated <= request.skip_count {
                    Event::Progress {
                        posts_found: 0,
                        posts_processed: None,
                        comments_collected: None,
                        message: format!(
                            "Skipping post {}/{}",
                            accumulated, request.skip_count
                        ),
                    }
                } else {
                    let found = accumulated - request.skip_count;
                    Event::Progress {
                        posts_found: found,
                        posts_processed: None,
                        comments_collected: None,
                        message: format!("Found {}/{} posts", found, request.post_count),
                    }
                };
                sink.emit(event).await?;

                if collected.len() >= wanted {
                    break;
                }
            }

            match next_cursor {
                Some(next) => cursor = Some(next),
                None => {
                    tracing::debug!(pages_fetched, "End of listing reached");
                    break;
                }
            }

            if collected.len() < wanted {
                tokio::time::sleep(self.config.collector.request_delay).await;
            }
        }

        Ok(collected
            .into_iter()
            .skip(request.skip_count)
            .take(request.post_count)
            .collect())
    }
}

/// Build the listing path for one page fetch.
///
/// Top listings pin the time window to `t=all` so results do not drift with
/// the default (daily) window. The cursor is percent-encoded; Reddit cursors
/// are `t3_`-prefixed IDs today, but the encoding keeps us honest if that
/// ever changes.
fn listing_path(request: &CollectionConfig, page_size: usize, cursor: Option<&str>) -> String {
    let mut path = format!(
        "/r/{}/{}.json?limit={}",
        request.subreddit,
        request.sort_mode.as_str(),
        page_size
    );
    if request.sort_mode == SortMode::Top {
        path.push_str("&t=all");
    }
    if let Some(after) = cursor {
        path.push_str("&after=");
        path.push_str(&urlencoding::encode(after));
    }
    path
}
