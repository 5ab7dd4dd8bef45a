//! Holdings aggregator CLI
//!
//! Looks up titles through the fixture-backed record fetcher and prints the
//! aggregated holdings as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use holdings_aggregator::{config::AppConfig, models::Patron, repository::JsonFileFetcher, AppState};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "holdings-aggregator")]
#[command(about = "Aggregate library holdings of catalog titles")]
#[command(version)]
struct Args {
    /// Title ids to look up
    #[arg(required = true)]
    titles: Vec<String>,

    /// Brief status of every title (no serials, no summary)
    #[arg(long, conflicts_with = "status")]
    brief: bool,

    /// Physical holdings with summary, without electronic links
    #[arg(long)]
    status: bool,

    /// Look up holdings on behalf of this patron
    #[arg(long)]
    patron: Option<String>,

    /// Directory with `<title>.json` record files
    #[arg(long, env = "HOLDINGS_FIXTURE_DIR")]
    fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing; stdout is reserved for the JSON output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("holdings_aggregator={}", config.logging.level).into());
    let json = config.logging.format == "json";
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    tracing::info!("Starting holdings aggregator v{}", env!("CARGO_PKG_VERSION"));

    let dir = args
        .fixtures
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.fixtures.dir));
    tracing::info!("Reading title records from {}", dir.display());

    let state = AppState::new(config, Arc::new(JsonFileFetcher::new(&dir)));
    let holdings = &state.services.holdings;

    let output = if args.brief {
        serde_json::to_value(holdings.get_statuses(&args.titles).await)?
    } else {
        let patron = args.patron.map(|id| Patron { id });
        let mut results = serde_json::Map::new();
        for title in &args.titles {
            let value = if args.status {
                serde_json::to_value(holdings.get_status(title).await?)?
            } else {
                serde_json::to_value(holdings.get_holding(title, patron.as_ref()).await?)?
            };
            results.insert(title.clone(), value);
        }
        serde_json::Value::Object(results)
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
