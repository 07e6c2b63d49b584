//! Configuration types for subtext-dl

use crate::error::{Error, Result};
use crate::types::{ExportMode, SortMode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::LazyLock;
use std::time::Duration;
use utoipa::ToSchema;

/// Valid subreddit names: 3-21 characters of letters, digits, or underscores,
/// not starting with an underscore.
#[allow(clippy::expect_used)]
static SUBREDDIT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_]{2,20}$").expect("valid regex literal"));

/// HTTP fetch behavior (hosts, identity, retry timing)
///
/// Groups settings for how requests to Reddit are made and retried.
/// Used as a flattened sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    ///
    /// Reddit serves its anonymous JSON endpoints far more reliably to
    /// browser-shaped agents than to obvious bots.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Primary Reddit host (default: <https://www.reddit.com>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fallback host tried after the primary fails (default: <https://old.reddit.com>)
    #[serde(default = "default_mirror_url")]
    pub mirror_url: Option<String>,

    /// Retries per host after the initial attempt (default: 2)
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// Base backoff after an HTTP 429, scaled by attempt number (default: 5 seconds)
    #[serde(default = "default_rate_limit_backoff", with = "duration_serde")]
    pub rate_limit_backoff: Duration,

    /// Fixed delay before retrying transient failures (default: 2 seconds)
    #[serde(default = "default_retry_delay", with = "duration_serde")]
    pub retry_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            base_url: default_base_url(),
            mirror_url: default_mirror_url(),
            retries: default_retries(),
            timeout: default_timeout(),
            rate_limit_backoff: default_rate_limit_backoff(),
            retry_delay: default_retry_delay(),
        }
    }
}

impl FetchConfig {
    /// Validate host URLs and the user agent string
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(Error::config("user_agent must not be empty", "user_agent"));
        }
        validate_host_url(&self.base_url, "base_url")?;
        if let Some(mirror) = &self.mirror_url {
            validate_host_url(mirror, "mirror_url")?;
        }
        Ok(())
    }
}

fn validate_host_url(value: &str, key: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| Error::config(format!("invalid URL '{value}': {e}"), key))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::config(
            format!("URL '{value}' must use http or https"),
            key,
        ));
    }
    if parsed.host_str().is_none() {
        return Err(Error::config(format!("URL '{value}' has no host"), key));
    }
    Ok(())
}

/// Pagination behavior of the post collector
///
/// Groups settings for how listing pages are walked.
/// Used as a flattened sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CollectorConfig {
    /// Posts requested per listing page (default: 100, Reddit's maximum)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Hard cap on listing page fetches per run (default: 100)
    #[serde(default = "default_max_page_fetches")]
    pub max_page_fetches: u32,

    /// Pause between consecutive upstream requests (default: 2 seconds)
    #[serde(default = "default_request_delay", with = "duration_serde")]
    pub request_delay: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_fetches: default_max_page_fetches(),
            request_delay: default_request_delay(),
        }
    }
}

/// Server-enforced bounds for collection requests
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LimitsConfig {
    /// Maximum posts a single request may target (default: 1000)
    #[serde(default = "default_max_posts")]
    pub max_posts: usize,

    /// Maximum posts a single request may skip (default: 5000)
    #[serde(default = "default_max_skip")]
    pub max_skip: usize,

    /// Maximum comments retained per post (default: 200)
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_posts: default_max_posts(),
            max_skip: default_max_skip(),
            max_comments: default_max_comments(),
        }
    }
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:6740)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Main configuration for a [`TextCollector`](crate::TextCollector)
///
/// Fields are organized into logical sub-configs:
/// - [`fetch`](FetchConfig) - hosts, identity, retry timing
/// - [`collector`](CollectorConfig) - pagination behavior
/// - [`limits`](LimitsConfig) - request bounds enforced at validation
/// - [`api`](ApiConfig) - REST server settings
///
/// The fetch and collector sub-configs are flattened, so their fields sit at
/// the top level of the JSON format the way the tuning knobs always have.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// HTTP fetch behavior (hosts, identity, retry timing)
    #[serde(flatten)]
    pub fetch: FetchConfig,

    /// Pagination behavior of the post collector
    #[serde(flatten)]
    pub collector: CollectorConfig,

    /// Server-enforced bounds for collection requests
    #[serde(default)]
    pub limits: LimitsConfig,

    /// REST API settings
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.fetch.validate()?;
        if self.collector.page_size == 0 {
            return Err(Error::config("page_size must be at least 1", "page_size"));
        }
        if self.collector.max_page_fetches == 0 {
            return Err(Error::config(
                "max_page_fetches must be at least 1",
                "max_page_fetches",
            ));
        }
        Ok(())
    }
}

/// Parameters of one collection run
///
/// This is the request body accepted by `POST /collect` and the argument to
/// [`TextCollector::run`](crate::TextCollector::run). Wire field names are
/// camelCase to match the web UI form.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionConfig {
    /// Subreddit to collect from, without the "r/" prefix
    pub subreddit: String,

    /// Number of posts to collect (default: 10)
    #[serde(default = "default_post_count")]
    pub post_count: usize,

    /// Number of qualifying posts to skip before collecting (default: 0)
    #[serde(default)]
    pub skip_count: usize,

    /// Top-level comments to retain per post (default: 10)
    #[serde(default = "default_comments_per_post")]
    pub comments_per_post: usize,

    /// Listing sort order (default: top)
    #[serde(default)]
    pub sort_mode: SortMode,

    /// Shape of the exported records (default: structured)
    #[serde(default)]
    pub export_mode: ExportMode,
}

impl CollectionConfig {
    /// Create a request for `subreddit` with default counts and modes
    pub fn new(subreddit: impl Into<String>) -> Self {
        Self {
            subreddit: subreddit.into(),
            post_count: default_post_count(),
            skip_count: 0,
            comments_per_post: default_comments_per_post(),
            sort_mode: SortMode::default(),
            export_mode: ExportMode::default(),
        }
    }

    /// Validate the request against the server-enforced limits
    ///
    /// Every violation maps to [`Error::Config`] with the offending camelCase
    /// request key, so API clients can highlight the right form field.
    pub fn validate(&self, limits: &LimitsConfig) -> Result<()> {
        if !SUBREDDIT_NAME.is_match(&self.subreddit) {
            return Err(Error::config(
                "subreddit must be 3-21 letters, digits, or underscores and must not start with an underscore",
                "subreddit",
            ));
        }

        if self.post_count == 0 || self.post_count > limits.max_posts {
            return Err(Error::config(
                format!("postCount must be between 1 and {}", limits.max_posts),
                "postCount",
            ));
        }

        if self.skip_count > limits.max_skip {
            return Err(Error::config(
                format!("skipCount must be at most {}", limits.max_skip),
                "skipCount",
            ));
        }

        if self.comments_per_post == 0 || self.comments_per_post > limits.max_comments {
            return Err(Error::config(
                format!(
                    "commentsPerPost must be between 1 and {}",
                    limits.max_comments
                ),
                "commentsPerPost",
            ));
        }

        Ok(())
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_base_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_mirror_url() -> Option<String> {
    Some("https://old.reddit.com".to_string())
}

fn default_retries() -> u32 {
    2
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_rate_limit_backoff() -> Duration {
    Duration::from_secs(5)
}

fn default_retry_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_page_size() -> usize {
    100
}

fn default_max_page_fetches() -> u32 {
    100
}

fn default_request_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_max_posts() -> usize {
    1000
}

fn default_max_skip() -> usize {
    5000
}

fn default_max_comments() -> usize {
    200
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 6740))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

fn default_true() -> bool {
    true
}

/// Default post count for a collection request
pub(crate) fn default_post_count() -> usize {
    10
}

/// Default comments per post for a collection request
pub(crate) fn default_comments_per_post() -> usize {
    10
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
