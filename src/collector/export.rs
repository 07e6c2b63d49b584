//! Shaping collected posts and comments into export records.

use crate::types::{Comment, ExportMode, ExportRecord, FlatRecord, Post};

/// Shape one post and its comments into an export record.
///
/// Structured mode keeps the post and comments as typed objects. Flat mode
/// collapses everything into one ordered string map: a `"Post"` entry
/// holding the title (joined with the body when one exists) followed by a
/// `"Comment {rank}"` entry per comment, in rank order.
pub(crate) fn shape(post: Post, comments: Vec<Comment>, mode: ExportMode) -> ExportRecord {
    match mode {
        ExportMode::Structured => ExportRecord::Structured { post, comments },
        ExportMode::Flat => {
            let mut record = FlatRecord::new();
            let text = if post.body.is_empty() {
                post.title
            } else {
                format!("{}\n\n{}", post.title, post.body)
            };
            record.insert("Post", text);
            for comment in comments {
                record.insert(format!("Comment {}", comment.rank), comment.body);
            }
            ExportRecord::Flat(record)
        }
    }
}
