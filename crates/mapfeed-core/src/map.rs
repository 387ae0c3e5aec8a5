//! Persisted community map records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MapId, UserId};

/// A single location of a map's geodata payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Moderation and curation flags of a map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapFlags {
    /// Approved by staff and visible in discovery sections.
    pub accepted: bool,
    /// Waiting in the staff review queue.
    pub in_review: bool,
    pub rejected: bool,
    pub reject_reason: Option<String>,
    /// Editorially picked for the spotlight section.
    pub spotlight: bool,
}

/// A community map as stored in the record store.
///
/// `map_creator_name` is a denormalized copy of the creator's username.
/// It starts out absent and is filled in lazily the first time the record
/// is enriched; once set it is never cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    pub id: MapId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description_short: String,
    #[serde(default)]
    pub description_long: String,
    #[serde(default)]
    pub data: Vec<GeoPoint>,
    pub created_by: UserId,
    #[serde(default)]
    pub map_creator_name: Option<String>,
    #[serde(default)]
    pub hearts: u32,
    #[serde(default)]
    pub plays: u64,
    #[serde(flatten)]
    pub flags: MapFlags,
    pub created_at: DateTime<Utc>,
}

impl MapRecord {
    /// Creates an unmoderated record with an empty payload.
    pub fn new(
        id: impl Into<MapId>,
        name: impl Into<String>,
        created_by: impl Into<UserId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            description_short: String::new(),
            description_long: String::new(),
            data: Vec::new(),
            created_by: created_by.into(),
            map_creator_name: None,
            hearts: 0,
            plays: 0,
            flags: MapFlags::default(),
            created_at,
        }
    }

    /// Returns the denormalized creator name, if it has been resolved.
    pub fn creator_name(&self) -> Option<&str> {
        self.map_creator_name.as_deref()
    }

    /// Records the creator name unless one is already present.
    ///
    /// Returns `true` when the field was written.
    pub fn set_creator_name_if_absent(&mut self, name: impl Into<String>) -> bool {
        if self.map_creator_name.is_some() {
            return false;
        }
        self.map_creator_name = Some(name.into());
        true
    }

    /// Number of locations in the geodata payload.
    pub fn location_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_accepted(&self) -> bool {
        self.flags.accepted
    }
}

/// Lowercase, dash separated slug of a map name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
