//! Time-to-live cache of the discovery sections.

use std::sync::Arc;
use std::time::{Duration, Instant};

use mapfeed_core::{MapView, Section};
use parking_lot::RwLock;
use tracing::debug;

use crate::metrics::CacheMetrics;

/// Per-section time-to-live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub recent_ttl: Duration,
    pub popular_ttl: Duration,
    pub spotlight_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            recent_ttl: Duration::from_millis(2_400_000),
            popular_ttl: Duration::from_millis(4_800_000),
            spotlight_ttl: Duration::from_millis(4_800_000),
        }
    }
}

impl CacheConfig {
    /// Same TTL for every section. Mostly useful in tests.
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            recent_ttl: ttl,
            popular_ttl: ttl,
            spotlight_ttl: ttl,
        }
    }

    pub fn ttl(&self, section: Section) -> Duration {
        match section {
            Section::Recent => self.recent_ttl,
            Section::Popular => self.popular_ttl,
            Section::Spotlight => self.spotlight_ttl,
        }
    }
}

/// Immutable snapshot of one cached section.
///
/// Entries are never patched: a refresh builds a new entry and swaps the
/// pointer, so readers see either the old list or the new one.
#[derive(Debug)]
pub struct SectionEntry {
    section: Section,
    records: Vec<MapView>,
    last_refreshed: Option<Instant>,
    ttl: Duration,
}

impl SectionEntry {
    fn empty(section: Section, ttl: Duration) -> Self {
        Self {
            section,
            records: Vec::new(),
            last_refreshed: None,
            ttl,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn records(&self) -> &[MapView] {
        &self.records
    }

    pub fn last_refreshed(&self) -> Option<Instant> {
        self.last_refreshed
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stale iff `now - last_refreshed >= ttl`; never-refreshed entries are stale.
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.last_refreshed
            .is_some_and(|at| now.saturating_duration_since(at) < self.ttl)
    }
}

/// Result of [`SectionCache::get_section`].
#[derive(Debug, Clone)]
pub struct SectionLookup {
    /// Caller-owned copy of the cached list; empty when stale.
    pub records: Vec<MapView>,
    /// `false` means the caller must recompute and call `refresh`.
    pub is_fresh: bool,
}

/// Process-wide cache of the three discovery sections.
///
/// Staleness is checked lazily on access. Callers that observe a stale
/// entry recompute it themselves; there is no refresh lock, so concurrent
/// requests may recompute the same section and the last `refresh` wins.
#[derive(Debug)]
pub struct SectionCache {
    slots: [RwLock<Arc<SectionEntry>>; 3],
    config: CacheConfig,
    metrics: CacheMetrics,
}

impl SectionCache {
    /// Creates a cache with every section empty and stale.
    pub fn new(config: CacheConfig) -> Self {
        let slot = |s: Section| RwLock::new(Arc::new(SectionEntry::empty(s, config.ttl(s))));

        // Array position must match `Section::index`.
        Self {
            slots: [
                slot(Section::Recent),
                slot(Section::Popular),
                slot(Section::Spotlight),
            ],
            config,
            metrics: CacheMetrics::new(),
        }
    }

    /// Returns the cached records of `section` and whether they are fresh.
    pub fn get_section(&self, section: Section, now: Instant) -> SectionLookup {
        let entry = self.entry(section);

        if entry.is_fresh(now) {
            self.metrics.record_hit(section);
            debug!(section = %section, records = entry.records.len(), "Section cache hit");
            SectionLookup {
                records: entry.records.clone(),
                is_fresh: true,
            }
        } else {
            self.metrics.record_miss(section);
            debug!(section = %section, "Section cache miss");
            SectionLookup {
                records: Vec::new(),
                is_fresh: false,
            }
        }
    }

    /// Replaces the records of `section` and stamps the refresh time.
    ///
    /// Records are depersonalized before they are stored, whoever's request
    /// produced them.
    pub fn refresh(&self, section: Section, records: Vec<MapView>, now: Instant) {
        let records: Vec<MapView> = records.into_iter().map(MapView::depersonalized).collect();
        let entry = Arc::new(SectionEntry {
            section,
            records,
            last_refreshed: Some(now),
            ttl: self.config.ttl(section),
        });

        *self.slots[section.index()].write() = entry;
        self.metrics.record_refresh(section);
    }

    /// Resets `section` to the never-refreshed state.
    ///
    /// Returns true if the section held a refreshed entry.
    pub fn invalidate(&self, section: Section) -> bool {
        let empty = Arc::new(SectionEntry::empty(section, self.config.ttl(section)));
        let previous = std::mem::replace(&mut *self.slots[section.index()].write(), empty);
        previous.last_refreshed.is_some()
    }

    /// Resets every section. Returns how many held a refreshed entry.
    pub fn invalidate_all(&self) -> usize {
        Section::ALL
            .iter()
            .filter(|s| self.invalidate(**s))
            .count()
    }

    /// Current snapshot of `section`.
    pub fn entry(&self, section: Section) -> Arc<SectionEntry> {
        Arc::clone(&self.slots[section.index()].read())
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl Default for SectionCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
