//! Creator-name denormalization and projection of map records.

use std::sync::Arc;

use futures::future::join_all;
use mapfeed_core::{MapId, MapRecord, MapView, Projection, UserRecord, Viewer};
use mapfeed_store::{RecordStore, UserStore};
use tracing::{debug, info, warn};

use crate::metrics::feed::{record_backfill, record_backfill_failure};

/// Turns stored records into client projections.
///
/// The first time a record without `map_creator_name` passes through here,
/// the creator is looked up and the name is written back onto the stored
/// record, so later reads skip the user lookup entirely. Failures on that
/// path are logged and the projection goes out without a creator name.
#[derive(Clone)]
pub struct RecordEnricher {
    records: Arc<dyn RecordStore>,
    users: Arc<dyn UserStore>,
}

impl RecordEnricher {
    pub fn new(records: Arc<dyn RecordStore>, users: Arc<dyn UserStore>) -> Self {
        Self { records, users }
    }

    pub fn records(&self) -> &Arc<dyn RecordStore> {
        &self.records
    }

    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// Denormalizes the creator name if needed and projects for `viewer`.
    pub async fn enrich(
        &self,
        record: MapRecord,
        viewer: &Viewer<'_>,
        projection: Projection,
    ) -> MapView {
        self.enrich_with_owner(record, viewer, projection, None).await
    }

    /// Like [`enrich`](Self::enrich), with a user that may already be the
    /// creator. When it is, no user lookup is needed.
    pub async fn enrich_with_owner(
        &self,
        mut record: MapRecord,
        viewer: &Viewer<'_>,
        projection: Projection,
        known_owner: Option<&UserRecord>,
    ) -> MapView {
        self.ensure_creator_name(&mut record, known_owner).await;
        MapView::project(&record, viewer, projection)
    }

    /// Enriches a batch concurrently, preserving input order.
    pub async fn enrich_all(
        &self,
        records: Vec<MapRecord>,
        viewer: &Viewer<'_>,
        projection: Projection,
        known_owner: Option<&UserRecord>,
    ) -> Vec<MapView> {
        join_all(
            records
                .into_iter()
                .map(|r| self.enrich_with_owner(r, viewer, projection, known_owner)),
        )
        .await
    }

    /// Fills `record.map_creator_name` when absent.
    ///
    /// Returns true if the record carries a name afterwards.
    pub async fn ensure_creator_name(
        &self,
        record: &mut MapRecord,
        known_owner: Option<&UserRecord>,
    ) -> bool {
        if record.creator_name().is_some() {
            return true;
        }

        let name = match known_owner.filter(|u| u.id == record.created_by) {
            Some(owner) => owner.username.clone(),
            None => match self.users.find_by_id(&record.created_by).await {
                Ok(Some(owner)) => owner.username,
                Ok(None) => {
                    warn!(map = %record.id, creator = %record.created_by, "Map creator not found");
                    record_backfill_failure("owner_missing");
                    return false;
                },
                Err(e) => {
                    warn!(map = %record.id, error = %e, "Creator lookup failed");
                    record_backfill_failure("lookup");
                    return false;
                },
            },
        };

        record.set_creator_name_if_absent(name.clone());
        self.persist_creator_name(&record.id, name).await;
        true
    }

    /// Write-if-absent on the stored record's name field only.
    ///
    /// Concurrent first writers store the same name, since it is a function
    /// of the creator id.
    async fn persist_creator_name(&self, id: &MapId, name: String) {
        match self.records.set_creator_name_if_absent(id, &name).await {
            Ok(true) => {
                info!(map = %id, creator_name = %name, "Updated map creator name");
                record_backfill();
            },
            Ok(false) => debug!(map = %id, "Creator name already stored"),
            Err(e) => {
                warn!(map = %id, error = %e, "Failed to save map creator name");
                record_backfill_failure("persist");
            },
        }
    }
}
