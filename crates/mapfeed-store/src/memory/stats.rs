//! Operation counters of the in-memory store.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts store round-trips.
///
/// Cheap enough to keep on in production; the feed tests rely on it to
/// assert that cached sections issue no queries.
#[derive(Debug, Default)]
pub struct StoreStats {
    record_queries: AtomicU64,
    user_lookups: AtomicU64,
    saves: AtomicU64,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_query(&self) {
        self.record_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_user_lookup(&self) {
        self.user_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_save(&self) {
        self.saves.fetch_add(1, Ordering::Relaxed);
    }

    /// `find` and `find_by_id` calls on the record side.
    pub fn record_queries(&self) -> u64 {
        self.record_queries.load(Ordering::Relaxed)
    }

    /// `find_by_id` and `find_by_secret` calls on the user side.
    pub fn user_lookups(&self) -> u64 {
        self.user_lookups.load(Ordering::Relaxed)
    }

    /// Creator-name writes that changed a record.
    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.record_queries.store(0, Ordering::Relaxed);
        self.user_lookups.store(0, Ordering::Relaxed);
        self.saves.store(0, Ordering::Relaxed);
    }
}
