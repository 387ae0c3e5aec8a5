//! Cache module for the mapfeed server.
//!
//! Holds the discovery section cache: one slot per section, TTL-based
//! freshness checked on access, full-replace refresh.

pub mod section_cache;

// Re-exports
pub use section_cache::{CacheConfig, SectionCache, SectionEntry, SectionLookup};
