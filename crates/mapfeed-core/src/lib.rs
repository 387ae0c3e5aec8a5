//! Mapfeed Core - domain types for the map discovery feed.
//!
//! Records as stored (`MapRecord`, `UserRecord`), the closed set of
//! discovery [`Section`]s, the requester [`Viewer`] and the client-facing
//! projections the server returns.

pub mod catalog;
pub mod error;
pub mod map;
pub mod section;
pub mod types;
pub mod user;
pub mod view;
pub mod viewer;

pub use catalog::{CountryMapView, OfficialMap, OfficialMapPage, StaticCatalog};
pub use error::{DomainError, Result};
pub use map::{GeoPoint, MapFlags, MapRecord, slugify};
pub use section::Section;
pub use types::{MapId, UserId};
pub use user::{HeartedMaps, Role, UserRecord};
pub use view::{FeedResponse, MapDetail, MapView, ModerationView, Projection};
pub use viewer::Viewer;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
