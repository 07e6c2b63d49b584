//! Media post detection
//!
//! The collector keeps text discussions and drops everything that is
//! primarily an image, video, or gallery. A post qualifies as media when any
//! one of four independent signals fires; checks run cheapest-first.

use crate::reddit::RawPost;

/// Post hints Reddit assigns to media content
const MEDIA_HINTS: [&str; 4] = ["image", "hosted:video", "rich:video", "gallery"];

/// Image file extensions checked against the post URL (case-insensitive)
const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Returns true when the post is media content rather than a text discussion
///
/// A post is media when any of these holds:
/// - its `post_hint` names a media type
/// - its gallery flag is set
/// - its URL ends in a known image extension
/// - it carries a non-null `preview` or `media` payload
///
/// # Example
///
/// ```
/// use subtext_dl::filter::is_media;
/// use subtext_dl::reddit::RawPost;
///
/// let image = RawPost {
///     url: "https://i.redd.it/crab.JPG".into(),
///     ..RawPost::default()
/// };
/// assert!(is_media(&image));
///
/// let discussion = RawPost {
///     url: "https://www.reddit.com/r/rust/comments/abc123/".into(),
///     ..RawPost::default()
/// };
/// assert!(!is_media(&discussion));
/// ```
#[must_use]
pub fn is_media(post: &RawPost) -> bool {
    if let Some(hint) = &post.post_hint {
        if MEDIA_HINTS.contains(&hint.as_str()) {
            return true;
        }
    }

    if post.is_gallery == Some(true) {
        return true;
    }

    if has_image_extension(&post.url) {
        return true;
    }

    post.preview.is_some() || post.media.is_some()
}

/// Case-insensitive check for a known image extension at the end of the URL
fn has_image_extension(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_post() -> RawPost {
        RawPost {
            id: "abc123".into(),
            title: "What did you learn this week?".into(),
            selftext: "Share below.".into(),
            url: "https://www.reddit.com/r/rust/comments/abc123/".into(),
            ..RawPost::default()
        }
    }

    #[test]
    fn plain_text_post_is_not_media() {
        assert!(!is_media(&text_post()));
    }

    #[test]
    fn every_media_hint_marks_the_post() {
        for hint in MEDIA_HINTS {
            let post = RawPost {
                post_hint: Some(hint.to_string()),
                ..text_post()
            };
            assert!(is_media(&post), "hint '{hint}' must mark the post as media");
        }
    }

    #[test]
    fn non_media_hints_do_not_mark_the_post() {
        for hint in ["self", "link"] {
            let post = RawPost {
                post_hint: Some(hint.to_string()),
                ..text_post()
            };
            assert!(!is_media(&post), "hint '{hint}' is not a media hint");
        }
    }

    #[test]
    fn gallery_flag_marks_the_post() {
        let post = RawPost {
            is_gallery: Some(true),
            ..text_post()
        };
        assert!(is_media(&post));

        let post = RawPost {
            is_gallery: Some(false),
            ..text_post()
        };
        assert!(!is_media(&post), "an explicit false flag is not media");
    }

    #[test]
    fn image_extensions_match_case_insensitively() {
        for url in [
            "https://i.redd.it/abc.jpg",
            "https://i.redd.it/abc.JPEG",
            "https://i.imgur.com/x.PNG",
            "https://example.com/pic.gif",
            "https://example.com/pic.webp",
        ] {
            let post = RawPost {
                url: url.to_string(),
                ..text_post()
            };
            assert!(is_media(&post), "URL '{url}' should be detected as an image");
        }
    }

    #[test]
    fn extension_must_terminate_the_url() {
        // ".jpg" in the middle of a path is not an image URL
        let post = RawPost {
            url: "https://example.com/abc.jpg/discussion".into(),
            ..text_post()
        };
        assert!(!is_media(&post));
    }

    #[test]
    fn preview_payload_marks_the_post() {
        let post = RawPost {
            preview: Some(json!({ "images": [] })),
            ..text_post()
        };
        assert!(is_media(&post));
    }

    #[test]
    fn media_payload_marks_the_post() {
        let post = RawPost {
            media: Some(json!({ "reddit_video": {} })),
            ..text_post()
        };
        assert!(is_media(&post));
    }

    #[test]
    fn null_preview_deserializes_to_none_and_passes() {
        // Reddit serves "preview": null on most text posts
        let raw: RawPost = serde_json::from_value(json!({
            "id": "abc",
            "url": "https://example.com/article",
            "preview": null,
            "media": null,
        }))
        .unwrap();

        assert!(raw.preview.is_none());
        assert!(!is_media(&raw));
    }

    #[test]
    fn any_single_signal_is_sufficient() {
        // A link post with no hint but a preview payload is still media
        let post = RawPost {
            url: "https://example.com/article".into(),
            preview: Some(json!({})),
            ..text_post()
        };
        assert!(is_media(&post));
    }
}
