//! In-memory record and user store.

mod seed;
mod stats;

use std::collections::HashMap;

use async_trait::async_trait;
use mapfeed_core::{MapId, MapRecord, UserId, UserRecord};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::source::{MapQuery, RecordStore, UserStore};

pub use seed::SeedData;
pub use stats::StoreStats;

/// A process-local store implementing both [`RecordStore`] and [`UserStore`].
///
/// Locks are only held for the duration of a map lookup or clone, never
/// across an await.
#[derive(Debug, Default)]
pub struct MemoryStore {
    maps: RwLock<HashMap<MapId, MapRecord>>,
    users: RwLock<HashMap<UserId, UserRecord>>,
    stats: StoreStats,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated from a seed document.
    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        for map in seed.maps {
            store.insert_map(map);
        }
        for user in seed.users {
            store.insert_user(user);
        }
        debug!(
            maps = store.map_count(),
            users = store.users.read().len(),
            "Memory store seeded"
        );
        store
    }

    pub fn insert_map(&self, map: MapRecord) {
        self.maps.write().insert(map.id.clone(), map);
    }

    pub fn insert_user(&self, user: UserRecord) {
        self.users.write().insert(user.id.clone(), user);
    }

    /// Direct snapshot of a record, bypassing the counters.
    pub fn map(&self, id: &MapId) -> Option<MapRecord> {
        self.maps.read().get(id).cloned()
    }

    pub fn map_count(&self) -> usize {
        self.maps.read().len()
    }

    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find(&self, query: &MapQuery) -> Result<Vec<MapRecord>, StoreError> {
        self.stats.record_query();
        let maps = self.maps.read();
        Ok(query.apply(maps.values()))
    }

    async fn find_by_id(&self, id: &MapId) -> Result<Option<MapRecord>, StoreError> {
        self.stats.record_query();
        Ok(self.maps.read().get(id).cloned())
    }

    async fn set_creator_name_if_absent(&self, id: &MapId, name: &str) -> Result<bool, StoreError> {
        let mut maps = self.maps.write();
        let written = maps
            .get_mut(id)
            .is_some_and(|record| record.set_creator_name_if_absent(name));
        if written {
            self.stats.record_save();
        }
        Ok(written)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        self.stats.record_user_lookup();
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_by_secret(&self, secret: &str) -> Result<Option<UserRecord>, StoreError> {
        self.stats.record_user_lookup();
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.secret == secret)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MapFilter, MapSort};
    use chrono::{Duration, Utc};

    fn store() -> MemoryStore {
        let now = Utc::now();
        let store = MemoryStore::new();
        for (id, hearts, age) in [("a", 5, 2), ("b", 10, 1), ("c", 1, 0)] {
            let mut map = MapRecord::new(id, id, "u1", now - Duration::hours(age));
            map.hearts = hearts;
            map.flags.accepted = id != "c";
            store.insert_map(map);
        }
        store.insert_user(UserRecord::new("u1", "alice", "secret-1"));
        store
    }

    #[tokio::test]
    async fn find_applies_filter_sort_and_limit() {
        let store = store();
        let query = MapQuery::new(MapFilter::Accepted)
            .sorted(MapSort::MostHearted)
            .limit(1);

        let found = store.find(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "b");
        assert_eq!(store.stats().record_queries(), 1);
    }

    #[tokio::test]
    async fn creator_name_is_written_once_and_only_that_field() {
        let store = store();
        let id = MapId::from("a");
        let mut other_writer = store.map(&id).unwrap();
        other_writer.hearts = 42;
        store.insert_map(other_writer);

        assert!(store.set_creator_name_if_absent(&id, "alice").await.unwrap());
        assert!(!store.set_creator_name_if_absent(&id, "mallory").await.unwrap());
        assert!(!store.set_creator_name_if_absent(&MapId::from("zz"), "x").await.unwrap());

        let stored = RecordStore::find_by_id(&store, &id).await.unwrap().unwrap();
        assert_eq!(stored.creator_name(), Some("alice"));
        assert_eq!(stored.hearts, 42);
        assert_eq!(store.stats().saves(), 1);
    }

    #[tokio::test]
    async fn users_resolve_by_id_and_secret() {
        let store = store();

        let by_secret = store.find_by_secret("secret-1").await.unwrap().unwrap();
        assert_eq!(by_secret.username, "alice");
        assert!(store.find_by_secret("nope").await.unwrap().is_none());

        let by_id = UserStore::find_by_id(&store, &UserId::from("u1")).await.unwrap();
        assert!(by_id.is_some());
        assert_eq!(store.stats().user_lookups(), 3);
    }

    #[test]
    fn from_seed_loads_everything() {
        let seed = SeedData {
            maps: vec![MapRecord::new("m", "M", "u", Utc::now())],
            users: vec![UserRecord::new("u", "user", "s")],
        };
        let store = MemoryStore::from_seed(seed);
        assert_eq!(store.map_count(), 1);
    }
}
