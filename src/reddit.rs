//! Reddit JSON wire shapes
//!
//! Reddit's anonymous `.json` endpoints wrap everything in `Listing`
//! envelopes whose children are kind-tagged "things" (`t3` posts, `t1`
//! comments, `more` stubs). Parsing is deliberately lenient: an envelope
//! that does not match becomes an empty listing, and a child that does not
//! parse is dropped, so one malformed item never aborts a run.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::Post;

/// A listing envelope returned by Reddit
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Listing {
    /// Envelope payload
    #[serde(default)]
    pub data: ListingData,
}

/// Payload of a [`Listing`]
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListingData {
    /// Pagination cursor naming the last item of this page, if another
    /// page exists
    #[serde(default)]
    pub after: Option<String>,

    /// Items on this page
    #[serde(default)]
    pub children: Vec<Thing>,
}

/// A kind-tagged item inside a listing
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Thing {
    /// Reddit type tag: "t3" for posts, "t1" for comments, "more" for
    /// collapsed comment stubs
    #[serde(default)]
    pub kind: String,

    /// Kind-specific payload, decoded on demand
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Listing {
    /// Decode a listing endpoint response
    ///
    /// Any shape mismatch yields an empty listing, which the collector
    /// treats the same as an exhausted one.
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Extract the post payloads from this page, dropping non-post children
    pub fn posts(self) -> Vec<RawPost> {
        self.data
            .children
            .into_iter()
            .filter(|thing| thing.kind == "t3")
            .filter_map(|thing| serde_json::from_value(thing.data).ok())
            .collect()
    }
}

/// Extract top-level comments from a permalink `.json` response
///
/// The permalink endpoint returns a two-element array: the post listing,
/// then the comment listing. Responses with fewer than two elements (or a
/// non-array shape) yield no comments rather than an error, matching how
/// Reddit serves posts whose comment tree is unavailable.
pub fn comment_listing(value: serde_json::Value) -> Vec<RawComment> {
    let serde_json::Value::Array(mut segments) = value else {
        return Vec::new();
    };
    if segments.len() < 2 {
        return Vec::new();
    }

    let listing = Listing::from_value(segments.swap_remove(1));
    listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind == "t1")
        .filter_map(|thing| serde_json::from_value(thing.data).ok())
        .collect()
}

/// Post payload as Reddit serves it, reduced to the fields the collector
/// reads
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPost {
    /// Post identifier (base36, without the "t3_" prefix)
    #[serde(default)]
    pub id: String,

    /// Post title
    #[serde(default)]
    pub title: String,

    /// Self-text body; empty for link posts
    #[serde(default)]
    pub selftext: String,

    /// Site-relative permalink
    #[serde(default)]
    pub permalink: String,

    /// Source URL the post points at
    #[serde(default)]
    pub url: String,

    /// Creation time as a Unix timestamp (Reddit serves it as a float)
    #[serde(default)]
    pub created_utc: f64,

    /// Net vote score
    #[serde(default)]
    pub score: i64,

    /// Reddit's content-type hint ("image", "hosted:video", ...), when set
    #[serde(default)]
    pub post_hint: Option<String>,

    /// Set on gallery posts
    #[serde(default)]
    pub is_gallery: Option<bool>,

    /// Media preview payload; presence marks media-bearing posts
    #[serde(default)]
    pub preview: Option<serde_json::Value>,

    /// Embedded media payload; presence marks media-bearing posts
    #[serde(default)]
    pub media: Option<serde_json::Value>,
}

impl RawPost {
    /// Convert into the domain [`Post`] retained by a collection run
    pub fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            body: self.selftext,
            permalink: self.permalink,
            url: self.url,
            created: DateTime::from_timestamp(self.created_utc as i64, 0)
                .unwrap_or_else(Utc::now),
            score: self.score,
        }
    }
}

/// Comment payload as Reddit serves it, reduced to the fields the collector
/// reads
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawComment {
    /// Comment identifier (base36, without the "t1_" prefix)
    #[serde(default)]
    pub id: String,

    /// Comment body; absent on some deleted comments
    #[serde(default)]
    pub body: Option<String>,

    /// Net vote score
    #[serde(default)]
    pub score: i64,
}
