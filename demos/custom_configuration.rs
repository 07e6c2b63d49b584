//! Custom configuration example
//!
//! This example shows how to configure subtext-dl with various options:
//! - Host selection and retry timing
//! - Pagination behavior and request pacing
//! - Server-enforced request limits
//! - Flat export mode for spreadsheet-style output

use std::time::Duration;
use subtext_dl::config::{CollectorConfig, FetchConfig, LimitsConfig};
use subtext_dl::{CollectionConfig, Config, ExportMode, SortMode, TextCollector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Fetch behavior: identify yourself honestly, skip the mirror host,
    // and back off generously when Reddit pushes back
    let fetch = FetchConfig {
        user_agent: "my-research-tool/1.0 (contact: research@example.com)".to_string(),
        base_url: "https://www.reddit.com".to_string(),
        mirror_url: None,
        retries: 3,
        timeout: Duration::from_secs(20),
        rate_limit_backoff: Duration::from_secs(10),
        retry_delay: Duration::from_secs(3),
    };

    // Pagination: smaller pages, a tighter page cap, slower pacing
    let collector_config = CollectorConfig {
        page_size: 50,
        max_page_fetches: 20,
        request_delay: Duration::from_secs(3),
    };

    // Limits: bound what a single request may ask for
    let limits = LimitsConfig {
        max_posts: 100,
        max_skip: 500,
        max_comments: 50,
    };

    let config = Config {
        fetch,
        collector: collector_config,
        limits,
        ..Default::default()
    };

    println!("Configuration:");
    println!("  Base URL: {}", config.fetch.base_url);
    println!("  Page size: {}", config.collector.page_size);
    println!(
        "  Request delay: {:?}",
        config.collector.request_delay
    );
    println!("  Max posts per request: {}", config.limits.max_posts);

    let collector = TextCollector::new(config)?;
    println!("✓ Collector initialized with custom configuration");

    // Flat export labels the post "Post" and its comments "Comment 1",
    // "Comment 2", and so on, which pastes cleanly into a spreadsheet
    let mut request = CollectionConfig::new("AskHistorians");
    request.post_count = 2;
    request.comments_per_post = 3;
    request.sort_mode = SortMode::New;
    request.export_mode = ExportMode::Flat;

    let records = collector.collect(&request).await?;

    for (index, record) in records.iter().enumerate() {
        println!("--- Record {} ---", index + 1);
        println!("{}", serde_json::to_string_pretty(record)?);
    }

    Ok(())
}
