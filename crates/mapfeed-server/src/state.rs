//! Application state.

use std::sync::Arc;

use mapfeed_core::{StaticCatalog, UserRecord};
use mapfeed_store::{LocationFiles, MemoryStore, RecordStore, StoreError, UserStore};

use crate::cache::{CacheConfig, SectionCache};
use crate::error::AppError;
use crate::feed::{FeedAssembler, FeedOptions, MapPages, RecordEnricher};

/// Application state shared across all handlers.
///
/// The section cache lives here and nowhere else: created empty with the
/// state, dropped with it.
#[derive(Clone)]
pub struct AppState {
    records: Arc<dyn RecordStore>,
    users: Arc<dyn UserStore>,
    feed: Arc<FeedAssembler>,
    pages: Arc<MapPages>,
    cache: Arc<SectionCache>,
    locations: Arc<LocationFiles>,
}

impl AppState {
    /// Wires the feed services over the given stores.
    pub fn new(
        records: Arc<dyn RecordStore>,
        users: Arc<dyn UserStore>,
        catalog: StaticCatalog,
        cache_config: CacheConfig,
        options: FeedOptions,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let cache = Arc::new(SectionCache::new(cache_config));
        let enricher = RecordEnricher::new(Arc::clone(&records), Arc::clone(&users));

        let pages = MapPages::new(
            enricher.clone(),
            Arc::clone(&catalog),
            options.official_author.clone(),
        );
        let feed = FeedAssembler::new(enricher, Arc::clone(&cache), catalog, options);

        Self {
            records,
            users,
            feed: Arc::new(feed),
            pages: Arc::new(pages),
            cache,
            locations: Arc::new(LocationFiles::default()),
        }
    }

    /// Serves official map locations from `locations` instead of `./public`.
    pub fn with_locations(mut self, locations: LocationFiles) -> Self {
        self.locations = Arc::new(locations);
        self
    }

    /// State backed by one in-memory store for both records and users.
    pub fn from_memory_store(
        store: Arc<MemoryStore>,
        catalog: StaticCatalog,
        cache_config: CacheConfig,
        options: FeedOptions,
    ) -> Self {
        Self::new(store.clone(), store, catalog, cache_config, options)
    }

    pub fn feed(&self) -> &FeedAssembler {
        &self.feed
    }

    pub fn pages(&self) -> &MapPages {
        &self.pages
    }

    pub fn cache(&self) -> &SectionCache {
        &self.cache
    }

    pub fn locations(&self) -> &LocationFiles {
        &self.locations
    }

    /// Health of the backing record store.
    pub async fn store_health(&self) -> Result<(), StoreError> {
        self.records.health_check().await
    }

    /// Resolves the requester from an optional session secret.
    ///
    /// No secret means anonymous. A secret that matches no account is a
    /// `NotFound`, not a downgrade to anonymous.
    pub async fn resolve_requester(&self, secret: Option<&str>) -> Result<Option<UserRecord>, AppError> {
        let Some(secret) = secret else {
            return Ok(None);
        };

        match self.users.find_by_secret(secret).await? {
            Some(user) => Ok(Some(user)),
            None => Err(AppError::NotFound("User not found".to_string())),
        }
    }
}
