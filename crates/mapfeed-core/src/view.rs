//! Client-facing projections of stored records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::CountryMapView;
use crate::map::{GeoPoint, MapRecord};
use crate::types::MapId;
use crate::viewer::Viewer;

/// Which viewer-dependent fields a projection carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Projection {
    /// Include the moderation block (`accepted`, `in_review`, ...).
    pub moderation: bool,
    /// Include `isCreator`.
    pub creator_flag: bool,
}

impl Projection {
    /// Discovery sections: nothing viewer-specific besides `hearted`.
    pub const PUBLIC: Projection = Projection {
        moderation: false,
        creator_flag: false,
    };

    /// Owner or staff view of a map.
    pub const MODERATED: Projection = Projection {
        moderation: true,
        creator_flag: true,
    };

    /// `isCreator` only; moderation fields stay hidden.
    pub const WITH_CREATOR: Projection = Projection {
        moderation: false,
        creator_flag: true,
    };
}

/// Moderation state, only shown to the map's owner or to staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationView {
    pub accepted: bool,
    pub in_review: bool,
    pub rejected: bool,
    pub reject_reason: Option<String>,
}

/// A map as sent to the client in feed sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub id: MapId,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by_name: Option<String>,
    pub description_short: String,
    pub hearts: u32,
    pub plays: u64,
    #[serde(rename = "locationsCnt")]
    pub locations_count: usize,
    pub hearted: bool,
    #[serde(rename = "isCreator", skip_serializing_if = "Option::is_none")]
    pub is_creator: Option<bool>,
    #[serde(flatten)]
    pub moderation: Option<ModerationView>,
}

impl MapView {
    /// Projects `record` for `viewer`.
    ///
    /// The creator name is taken from the record's denormalized field, so
    /// callers resolve it first.
    pub fn project(record: &MapRecord, viewer: &Viewer<'_>, projection: Projection) -> Self {
        Self {
            id: record.id.clone(),
            slug: record.slug.clone(),
            name: record.name.clone(),
            created_at: record.created_at,
            created_by_name: record.map_creator_name.clone(),
            description_short: record.description_short.clone(),
            hearts: record.hearts,
            plays: record.plays,
            locations_count: record.location_count(),
            hearted: viewer.has_hearted(&record.id),
            is_creator: projection
                .creator_flag
                .then(|| viewer.is_creator_of(record)),
            moderation: projection.moderation.then(|| ModerationView {
                accepted: record.flags.accepted,
                in_review: record.flags.in_review,
                rejected: record.flags.rejected,
                reject_reason: record.flags.reject_reason.clone(),
            }),
        }
    }

    /// Strips every requester-specific field.
    pub fn depersonalized(mut self) -> Self {
        self.hearted = false;
        self.is_creator = None;
        self
    }

    /// Stamps `hearted` for `viewer`.
    pub fn personalize(&mut self, viewer: &Viewer<'_>) {
        self.hearted = viewer.has_hearted(&self.id);
    }
}

/// Full detail of a single community map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDetail {
    #[serde(flatten)]
    pub view: MapView,
    pub description_long: String,
    pub locations: Vec<GeoPoint>,
}

impl MapDetail {
    pub fn new(view: MapView, record: &MapRecord) -> Self {
        Self {
            view,
            description_long: record.description_long.clone(),
            locations: record.data.clone(),
        }
    }
}

/// Response body of the feed endpoint.
///
/// Personal sections are omitted when empty; the catalog and the discovery
/// sections are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_queue: Option<Vec<MapView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_maps: Option<Vec<MapView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_maps: Option<Vec<MapView>>,
    pub country_maps: Vec<CountryMapView>,
    pub recent: Vec<MapView>,
    pub popular: Vec<MapView>,
    pub spotlight: Vec<MapView>,
}
