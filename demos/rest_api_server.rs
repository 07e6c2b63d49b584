//! REST API server example
//!
//! This example shows how to run subtext-dl with the REST API enabled,
//! allowing collection runs to be driven over HTTP.
//!
//! After starting, you can:
//! - View Swagger UI at http://localhost:6740/swagger-ui
//! - Start a collection via POST http://localhost:6740/collect (streams SSE)
//! - Check the request bounds via GET http://localhost:6740/limits

use std::net::SocketAddr;
use std::sync::Arc;
use subtext_dl::api::start_api_server;
use subtext_dl::config::{ApiConfig, Config};
use subtext_dl::TextCollector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Configure the API
    let api_config = ApiConfig {
        bind_address: "127.0.0.1:6740".parse::<SocketAddr>()?,
        cors_enabled: true,
        cors_origins: vec!["*".to_string()],
        swagger_ui: true,
    };

    let config = Config {
        api: api_config,
        ..Default::default()
    };

    let collector = TextCollector::new(config.clone())?;
    let config_arc = Arc::new(config);

    println!("🚀 Starting subtext-dl REST API server");
    println!("📖 Swagger UI: http://localhost:6740/swagger-ui");
    println!("📡 Limits: http://localhost:6740/limits");
    println!();
    println!("Example commands:");
    println!("  # Collect 5 posts and stream progress (Server-Sent Events)");
    println!("  curl -N -X POST http://localhost:6740/collect \\");
    println!("    -H 'Content-Type: application/json' \\");
    println!("    -d '{{\"subreddit\": \"AskHistorians\", \"postCount\": 5}}'");
    println!();
    println!("  # Check the server-enforced request bounds");
    println!("  curl http://localhost:6740/limits");

    // Start the API server (runs until interrupted)
    start_api_server(collector, config_arc).await?;

    Ok(())
}
