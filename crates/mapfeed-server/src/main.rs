//! Mapfeed server binary.

use std::sync::Arc;

use mapfeed_core::StaticCatalog;
use mapfeed_server::{AppState, Settings, metrics::init_metrics, run_server};
use mapfeed_store::{LocationFiles, MemoryStore, SeedData, load_catalog};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting mapfeed server v{}", env!("CARGO_PKG_VERSION"));

    let prometheus_handle = init_metrics()?;

    let catalog = match &settings.catalog.path {
        Some(path) => load_catalog(path).await?,
        None => {
            tracing::warn!("No catalog.path configured, countryMaps will be empty");
            StaticCatalog::default()
        },
    };
    tracing::info!(maps = catalog.len(), "Official catalog loaded");

    let store = match &settings.store.seed_path {
        Some(path) => MemoryStore::from_seed(SeedData::load(path).await?),
        None => MemoryStore::new(),
    };
    tracing::info!(maps = store.map_count(), "Memory store ready");

    let state = AppState::from_memory_store(
        Arc::new(store),
        catalog,
        settings.cache_config(),
        settings.feed_options(),
    )
    .with_locations(LocationFiles::new(settings.locations.dir.clone()));

    run_server(settings.addr()?, state, prometheus_handle).await?;

    Ok(())
}
