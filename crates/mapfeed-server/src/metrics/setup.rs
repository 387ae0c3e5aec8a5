//! Metrics setup and initialization.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

use super::{cache::register_cache_metrics, feed::register_feed_metrics, http::register_http_metrics};

/// Installs the Prometheus recorder and returns the handle for `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets(&[
            0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
        ])?
        .install_recorder()?;

    register_http_metrics();
    register_cache_metrics();
    register_feed_metrics();

    info!("Metrics system initialized");
    Ok(handle)
}
