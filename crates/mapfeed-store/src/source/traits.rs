//! Store trait definitions.

use async_trait::async_trait;
use mapfeed_core::{MapId, MapRecord, UserId, UserRecord};

use super::MapQuery;
use crate::error::StoreError;

/// Persistent collection of community maps.
///
/// Every method is a suspension point; implementations must not hold locks
/// across their own awaits.
///
/// # Implementors
///
/// - `MemoryStore` - in-process maps guarded by `parking_lot` locks
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the records selected by `query`, ordered and bounded as it asks.
    ///
    /// # Errors
    ///
    /// - `StoreError::Unavailable` if the store cannot be reached
    /// - `StoreError::Timeout` if the query took too long
    async fn find(&self, query: &MapQuery) -> Result<Vec<MapRecord>, StoreError>;

    /// Looks up a single record.
    async fn find_by_id(&self, id: &MapId) -> Result<Option<MapRecord>, StoreError>;

    /// Stores `name` as the record's creator name unless one is already set.
    ///
    /// Touches that single field. Returns `true` if this call wrote it,
    /// `false` if a name was already present or the record does not exist.
    async fn set_creator_name_if_absent(&self, id: &MapId, name: &str) -> Result<bool, StoreError>;

    /// Verifies the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Returns the name of this store, for logging.
    fn name(&self) -> &str;
}

/// Read access to user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError>;

    /// Resolves the account owning an opaque session secret.
    async fn find_by_secret(&self, secret: &str) -> Result<Option<UserRecord>, StoreError>;
}
