//! Per-post top-level comment retrieval.

use crate::error::Result;
use crate::reddit;
use crate::types::Comment;

use super::TextCollector;

/// Comment bodies Reddit substitutes for removed content.
const TOMBSTONES: [&str; 2] = ["[deleted]", "[removed]"];

impl TextCollector {
    /// Fetch the top-level comments for a post.
    ///
    /// Requests the comment thread behind `permalink` sorted by top, drops
    /// comments whose body is missing or tombstoned, and ranks the survivors
    /// sequentially from 1 in source order. At most `limit` comments are
    /// returned. A response without a comment listing segment yields an
    /// empty result rather than an error.
    pub(crate) async fn collect_comments(
        &self,
        permalink: &str,
        limit: usize,
    ) -> Result<Vec<Comment>> {
        let path = format!(
            "{}.json?limit={}&sort=top",
            permalink.trim_end_matches('/'),
            limit
        );
        let value = self.fetcher.fetch_json(&path).await?;

        let comments = reddit::comment_listing(value)
            .into_iter()
            .filter_map(|raw| {
                let body = raw.body?;
                if body.is_empty() || TOMBSTONES.contains(&body.as_str()) {
                    return None;
                }
                Some((raw.id, body, raw.score))
            })
            .take(limit)
            .enumerate()
            .map(|(index, (id, body, score))| Comment {
                rank: index + 1,
                id,
                body,
                score,
            })
            .collect();

        Ok(comments)
    }
}
