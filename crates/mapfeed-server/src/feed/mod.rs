//! Feed construction: enrichment, personal sections, discovery and pages.

pub mod assembler;
pub mod enrich;
pub mod page;
pub mod personal;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::{DEFAULT_OFFICIAL_AUTHOR, DiscoveryLimits, FeedAssembler, FeedOptions};
pub use enrich::RecordEnricher;
pub use page::{MapPage, MapPages};
pub use personal::{PersonalSections, PersonalViewBuilder};
