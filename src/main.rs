//! Shoe catalog listing.
//!
//! Loads the catalog from the configured backend and prints the shoes matching the
//! search words given on the command line (all shoes when none are given).

use shoe_catalog::{CatalogStore, Config, LogFormat, RemoteCatalogClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting shoe catalog");
    tracing::info!("Backend: {}", config.base_url);
    if config.api_key.is_none() {
        tracing::debug!("No API key configured (SHOE_API_KEY)");
    }

    let client = RemoteCatalogClient::new(&config)?;
    let mut store = CatalogStore::new(client);
    store.load().await?;

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let shoes = store.search(&query);
    if shoes.is_empty() {
        println!("No shoes found.");
    }
    for shoe in shoes {
        println!("{}", shoe);
    }

    Ok(())
}
