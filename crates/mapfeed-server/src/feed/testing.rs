//! Store doubles and fixtures for the feed unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use mapfeed_core::{MapId, MapRecord, UserId, UserRecord};
use mapfeed_store::{MapFilter, MapQuery, MemoryStore, RecordStore, StoreError, UserStore};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Accepted map created `day` days after the epoch.
pub fn map(id: &str, creator: &str, day: i64, hearts: u32) -> MapRecord {
    let mut record = MapRecord::new(id, format!("Map {id}"), creator, epoch() + Duration::days(day));
    record.hearts = hearts;
    record.flags.accepted = true;
    record
}

/// Record store that can be switched off.
pub struct SwitchableRecords {
    inner: Arc<MemoryStore>,
    available: AtomicBool,
}

impl SwitchableRecords {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::unavailable("switched off"))
        }
    }
}

#[async_trait]
impl RecordStore for SwitchableRecords {
    async fn find(&self, query: &MapQuery) -> Result<Vec<MapRecord>, StoreError> {
        self.check()?;
        self.inner.find(query).await
    }

    async fn find_by_id(&self, id: &MapId) -> Result<Option<MapRecord>, StoreError> {
        self.check()?;
        RecordStore::find_by_id(self.inner.as_ref(), id).await
    }

    async fn set_creator_name_if_absent(&self, id: &MapId, name: &str) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.set_creator_name_if_absent(id, name).await
    }

    fn name(&self) -> &str {
        "switchable"
    }
}

/// Record store whose discovery queries fail while every other call works.
pub struct DiscoveryDown(pub Arc<MemoryStore>);

#[async_trait]
impl RecordStore for DiscoveryDown {
    async fn find(&self, query: &MapQuery) -> Result<Vec<MapRecord>, StoreError> {
        match query.filter() {
            MapFilter::Accepted | MapFilter::AcceptedSpotlight => Err(StoreError::unavailable("discovery index down")),
            _ => self.0.find(query).await,
        }
    }

    async fn find_by_id(&self, id: &MapId) -> Result<Option<MapRecord>, StoreError> {
        RecordStore::find_by_id(self.0.as_ref(), id).await
    }

    async fn set_creator_name_if_absent(&self, id: &MapId, name: &str) -> Result<bool, StoreError> {
        self.0.set_creator_name_if_absent(id, name).await
    }

    fn name(&self) -> &str {
        "discovery-down"
    }
}

/// User store whose every call fails.
pub struct DownUsers;

#[async_trait]
impl UserStore for DownUsers {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Timeout { seconds: 1 })
    }

    async fn find_by_secret(&self, _secret: &str) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Timeout { seconds: 1 })
    }
}
