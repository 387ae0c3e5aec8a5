//! Section cache metrics recording.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use mapfeed_core::Section;
use metrics::counter;

/// Registers the section cache metrics.
/// Call once at startup, after the recorder is installed.
pub fn register_cache_metrics() {
    metrics::describe_counter!(
        "mapfeed_section_cache_hits_total",
        "Discovery sections served from cache"
    );
    metrics::describe_counter!(
        "mapfeed_section_cache_misses_total",
        "Discovery sections found stale"
    );
    metrics::describe_counter!(
        "mapfeed_section_refreshes_total",
        "Discovery sections recomputed and stored"
    );
    metrics::describe_counter!(
        "mapfeed_section_refresh_failures_total",
        "Discovery section recomputations that failed and were served empty"
    );
}

/// Per-section hit/miss recorder.
///
/// Keeps local atomic counters next to the global `metrics` facade so
/// tests and logs can read them without a recorder installed.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<[AtomicU64; 3]>,
    misses: Arc<[AtomicU64; 3]>,
    refreshes: Arc<[AtomicU64; 3]>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self, section: Section) {
        self.hits[section.index()].fetch_add(1, Ordering::Relaxed);
        counter!("mapfeed_section_cache_hits_total", "section" => section.as_str()).increment(1);
    }

    pub fn record_miss(&self, section: Section) {
        self.misses[section.index()].fetch_add(1, Ordering::Relaxed);
        counter!("mapfeed_section_cache_misses_total", "section" => section.as_str())
            .increment(1);
    }

    pub fn record_refresh(&self, section: Section) {
        self.refreshes[section.index()].fetch_add(1, Ordering::Relaxed);
        counter!("mapfeed_section_refreshes_total", "section" => section.as_str()).increment(1);
    }

    pub fn record_refresh_failure(&self, section: Section) {
        counter!("mapfeed_section_refresh_failures_total", "section" => section.as_str())
            .increment(1);
    }

    pub fn hits(&self, section: Section) -> u64 {
        self.hits[section.index()].load(Ordering::Relaxed)
    }

    pub fn misses(&self, section: Section) -> u64 {
        self.misses[section.index()].load(Ordering::Relaxed)
    }

    pub fn refreshes(&self, section: Section) -> u64 {
        self.refreshes[section.index()].load(Ordering::Relaxed)
    }

    /// Hit rate across all sections (for logging/debugging).
    pub fn hit_rate(&self) -> f64 {
        let hits: u64 = Section::ALL.iter().map(|s| self.hits(*s)).sum();
        let misses: u64 = Section::ALL.iter().map(|s| self.misses(*s)).sum();
        let total = (hits + misses) as f64;
        if total == 0.0 { 0.0 } else { hits as f64 / total }
    }
}
