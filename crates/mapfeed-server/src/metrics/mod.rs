//! Metrics for the mapfeed server.

pub mod cache;
pub mod feed;
pub mod http;
pub mod setup;

pub use cache::CacheMetrics;
pub use setup::init_metrics;
