//! Basic collection example
//!
//! This example demonstrates the core functionality of subtext-dl:
//! - Creating a collector with the default configuration
//! - Streaming progress events through a channel
//! - Running a small collection and printing the results

use subtext_dl::{CollectionConfig, Config, Event, ExportRecord, TextCollector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Default configuration: www.reddit.com with old.reddit.com as the
    // fallback host, a browser-shaped User-Agent, and 2 second pacing
    // between upstream requests
    let collector = TextCollector::new(Config::default())?;

    // Ask for 3 posts with up to 5 top-level comments each
    let mut request = CollectionConfig::new("AskHistorians");
    request.post_count = 3;
    request.comments_per_post = 5;

    // Stream progress events through a channel
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Event>(16);
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                Event::Progress { message, .. } => println!("⏳ {message}"),
                Event::Complete { message, data } => {
                    println!("✓ {message}");
                    for record in data {
                        if let ExportRecord::Structured { post, comments } = record {
                            println!("  • {} ({} comments)", post.title, comments.len());
                        }
                    }
                }
                Event::Error { message } => println!("✗ {message}"),
            }
        }
    });

    collector.run(&request, &tx).await?;

    // Dropping the sender ends the printer task once the queue drains
    drop(tx);
    printer.await?;

    Ok(())
}
