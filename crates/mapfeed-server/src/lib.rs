//! Mapfeed Server - HTTP server for the map discovery feed.
//!
//! Serves `POST /api/map/mapHome` (the feed) and `POST /api/map/{slug}`
//! (single map pages) over the store traits of `mapfeed-store`, with the
//! three discovery sections held in a process-wide [`SectionCache`].

pub mod cache;
pub mod error;
pub mod extractors;
pub mod feed;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod state;

pub use cache::{CacheConfig, SectionCache};
pub use error::AppError;
pub use feed::{FeedAssembler, FeedOptions, MapPage, MapPages, RecordEnricher};
pub use server::{create_router, create_router_with_metrics, run_server};
pub use settings::{Settings, SettingsError};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
