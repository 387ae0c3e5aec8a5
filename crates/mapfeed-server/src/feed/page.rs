//! Single map pages.

use std::sync::Arc;

use mapfeed_core::{MapDetail, MapView, OfficialMapPage, Projection, StaticCatalog, UserRecord, Viewer};
use mapfeed_store::{MapFilter, MapQuery, StoreError};
use serde::Serialize;
use tracing::debug;

use super::enrich::RecordEnricher;

/// A resolved map page: either an official catalog map or a community map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MapPage {
    Official(OfficialMapPage),
    Community(MapDetail),
}

/// Resolves `/api/map/{slug}` lookups.
#[derive(Clone)]
pub struct MapPages {
    enricher: RecordEnricher,
    catalog: Arc<StaticCatalog>,
    official_author: String,
}

impl MapPages {
    pub fn new(enricher: RecordEnricher, catalog: Arc<StaticCatalog>, official_author: impl Into<String>) -> Self {
        Self {
            enricher,
            catalog,
            official_author: official_author.into(),
        }
    }

    /// Looks up the page for `slug` as seen by `requester`.
    ///
    /// Official maps shadow community maps with the same slug. Maps that are
    /// not accepted resolve only for their creator and staff; everyone else
    /// gets `None`, same as for a slug that does not exist.
    pub async fn find(&self, slug: &str, requester: Option<&UserRecord>) -> Result<Option<MapPage>, StoreError> {
        if let Some(page) = self.catalog.page(slug, &self.official_author) {
            return Ok(Some(MapPage::Official(page)));
        }

        let query = MapQuery::new(MapFilter::Slug(slug.to_string())).limit(1);
        let Some(mut record) = self.enricher.records().find(&query).await?.into_iter().next() else {
            return Ok(None);
        };

        let viewer = Viewer::new(requester);
        let privileged = viewer.can_moderate(&record);
        if !record.is_accepted() && !privileged {
            debug!(slug, map = %record.id, "Hiding unaccepted map from requester");
            return Ok(None);
        }

        let projection = if privileged {
            Projection::MODERATED
        } else {
            Projection::PUBLIC
        };

        self.enricher.ensure_creator_name(&mut record, requester).await;
        let view = MapView::project(&record, &viewer, projection);
        Ok(Some(MapPage::Community(MapDetail::new(view, &record))))
    }
}
