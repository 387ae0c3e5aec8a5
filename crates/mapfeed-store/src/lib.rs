//! # Mapfeed Store
//!
//! Storage boundary of the mapfeed service.
//!
//! The feed talks to its persistent data only through the [`RecordStore`]
//! and [`UserStore`] traits. This crate defines them, the query vocabulary
//! the feed needs, and a [`MemoryStore`] backend that can be seeded from a
//! JSON document.
//!
//! ## Example
//!
//! ```
//! use mapfeed_store::{MapFilter, MapQuery, MapSort, MemoryStore, RecordStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), mapfeed_store::StoreError> {
//! let store = MemoryStore::new();
//! let query = MapQuery::new(MapFilter::Accepted)
//!     .sorted(MapSort::Newest)
//!     .limit(20);
//! let recent = store.find(&query).await?;
//! assert!(recent.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod locations;
pub mod memory;
pub mod source;

// Re-exports
pub use catalog::load_catalog;
pub use error::StoreError;
pub use locations::LocationFiles;
pub use memory::{MemoryStore, SeedData, StoreStats};
pub use source::{MapFilter, MapQuery, MapSort, RecordStore, UserStore};

// Re-export mapfeed_core for consumers
pub use mapfeed_core;
