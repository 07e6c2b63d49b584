//! Core types for subtext-dl

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A text post retained by a collection run
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Post {
    /// Reddit post identifier (base36, without the "t3_" prefix)
    pub id: String,

    /// Post title
    pub title: String,

    /// Self-text body (empty for title-only posts)
    pub body: String,

    /// Site-relative permalink, e.g. "/r/AskReddit/comments/abc123/slug/"
    pub permalink: String,

    /// Source URL the post points at
    pub url: String,

    /// When the post was created
    pub created: DateTime<Utc>,

    /// Net vote score at collection time
    pub score: i64,
}

/// A top-level comment retained for a post
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    /// 1-based position among the retained comments of the post
    pub rank: usize,

    /// Reddit comment identifier (base36, without the "t1_" prefix)
    pub id: String,

    /// Comment body text
    pub body: String,

    /// Net vote score at collection time
    pub score: i64,
}

/// Listing sort order requested from Reddit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Highest scored posts; the listing query adds `t=all`
    #[default]
    Top,
    /// Newest posts first
    New,
    /// Currently trending posts
    Hot,
}

impl SortMode {
    /// Path segment used in the listing URL
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Top => "top",
            SortMode::New => "new",
            SortMode::Hot => "hot",
        }
    }
}

/// Shape of the exported records
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Nested `{post, comments}` objects
    #[default]
    Structured,
    /// One ordered label-to-text map per post
    Flat,
}

/// Event emitted while a collection run executes
///
/// A run emits any number of `progress` events followed by exactly one
/// terminal event (`complete` or `error`). The payloads match the SSE wire
/// format consumed by the web UI.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    /// Intermediate progress update
    #[serde(rename_all = "camelCase")]
    Progress {
        /// Qualifying posts found so far (0 while the skip window drains)
        posts_found: usize,

        /// Posts whose comments have been fetched so far
        #[serde(skip_serializing_if = "Option::is_none")]
        posts_processed: Option<usize>,

        /// Comments accumulated across processed posts
        #[serde(skip_serializing_if = "Option::is_none")]
        comments_collected: Option<usize>,

        /// Human-readable status line
        message: String,
    },

    /// Terminal event for a successful run
    Complete {
        /// Human-readable summary, noting when fewer posts than requested
        /// were found
        message: String,

        /// The exported records
        data: Vec<ExportRecord>,
    },

    /// Terminal event for a failed run
    Error {
        /// Human-readable failure description
        message: String,
    },
}

/// One exported post, shaped according to the requested [`ExportMode`]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportRecord {
    /// Nested record with the post and its comments
    Structured {
        /// The collected post
        post: Post,
        /// Retained top-level comments, ranked from 1
        comments: Vec<Comment>,
    },
    /// Flattened record keyed by display labels
    Flat(FlatRecord),
}

impl<'__s> ToSchema<'__s> for ExportRecord {
    fn schema() -> (
        &'__s str,
        utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>,
    ) {
        use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, OneOfBuilder, Schema};
        use utoipa::openapi::{Ref, RefOr};

        (
            "ExportRecord",
            RefOr::T(Schema::OneOf(
                OneOfBuilder::new()
                    .description(Some(
                        "One exported post, shaped per the requested export mode",
                    ))
                    .item(
                        ObjectBuilder::new()
                            .property("post", Ref::from_schema_name("Post"))
                            .required("post")
                            .property(
                                "comments",
                                ArrayBuilder::new().items(Ref::from_schema_name("Comment")),
                            )
                            .required("comments"),
                    )
                    .item(Ref::from_schema_name("FlatRecord"))
                    .build(),
            )),
        )
    }
}

/// Insertion-ordered map of display labels to text
///
/// Used by the flat export mode, which labels the post `"Post"` and its
/// comments `"Comment 1"`, `"Comment 2"`, and so on. Serialization preserves
/// the insertion order, which a plain JSON map type would not guarantee.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatRecord {
    entries: Vec<(String, String)>,
}

impl FlatRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label/text pair, keeping insertion order
    pub fn insert(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.entries.push((label.into(), text.into()));
    }

    /// Look up the text for a label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, text)| text.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(label, text)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, text)| (key.as_str(), text.as_str()))
    }

    /// Iterate over the labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl Serialize for FlatRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, text) in &self.entries {
            map.serialize_entry(label, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FlatRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct FlatRecordVisitor;

        impl<'de> serde::de::Visitor<'de> for FlatRecordVisitor {
            type Value = FlatRecord;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of string labels to string values")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut record = FlatRecord::new();
                while let Some((label, text)) = access.next_entry::<String, String>()? {
                    record.insert(label, text);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(FlatRecordVisitor)
    }
}

impl<'__s> ToSchema<'__s> for FlatRecord {
    fn schema() -> (
        &'__s str,
        utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>,
    ) {
        use utoipa::openapi::schema::{
            AdditionalProperties, ObjectBuilder, Schema, SchemaType,
        };
        use utoipa::openapi::RefOr;

        (
            "FlatRecord",
            RefOr::T(Schema::Object(
                ObjectBuilder::new()
                    .schema_type(SchemaType::Object)
                    .description(Some(
                        "Insertion-ordered map of labels (\"Post\", \"Comment 1\", ...) to text",
                    ))
                    .additional_properties(Some(AdditionalProperties::RefOr(RefOr::T(
                        Schema::Object(
                            ObjectBuilder::new().schema_type(SchemaType::String).build(),
                        ),
                    ))))
                    .build(),
            )),
        )
    }
}
