//! Assembly of the full feed response.

use std::sync::Arc;
use std::time::Instant;

use mapfeed_core::{FeedResponse, MapView, Projection, Section, StaticCatalog, UserRecord, Viewer};
use mapfeed_store::{MapFilter, MapQuery, MapSort, StoreError};
use rand::seq::SliceRandom;
use tracing::{debug, instrument, warn};

use super::enrich::RecordEnricher;
use super::personal::PersonalViewBuilder;
use crate::cache::SectionCache;

/// Author shown on every official catalog map.
pub const DEFAULT_OFFICIAL_AUTHOR: &str = "WorldGuessr";

/// How many records the bounded discovery sections hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryLimits {
    pub recent: usize,
    pub popular: usize,
}

impl Default for DiscoveryLimits {
    fn default() -> Self {
        Self {
            recent: 20,
            popular: 100,
        }
    }
}

/// Tunables of the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOptions {
    pub limits: DiscoveryLimits,
    pub official_author: String,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            limits: DiscoveryLimits::default(),
            official_author: DEFAULT_OFFICIAL_AUTHOR.to_string(),
        }
    }
}

/// Builds the feed for one requester.
///
/// Discovery sections come from the shared [`SectionCache`] and are
/// recomputed in-request when stale. Personal sections are computed on
/// every call.
#[derive(Clone)]
pub struct FeedAssembler {
    enricher: RecordEnricher,
    personal: PersonalViewBuilder,
    cache: Arc<SectionCache>,
    catalog: Arc<StaticCatalog>,
    options: FeedOptions,
}

impl FeedAssembler {
    pub fn new(
        enricher: RecordEnricher,
        cache: Arc<SectionCache>,
        catalog: Arc<StaticCatalog>,
        options: FeedOptions,
    ) -> Self {
        Self {
            personal: PersonalViewBuilder::new(enricher.clone()),
            enricher,
            cache,
            catalog,
            options,
        }
    }

    pub fn cache(&self) -> &Arc<SectionCache> {
        &self.cache
    }

    pub fn catalog(&self) -> &Arc<StaticCatalog> {
        &self.catalog
    }

    pub fn options(&self) -> &FeedOptions {
        &self.options
    }

    /// Assembles the feed for `requester` (`None` for anonymous).
    ///
    /// # Errors
    ///
    /// Store failures in the personal sections. Discovery failures are
    /// absorbed and served as empty sections.
    #[instrument(skip_all, fields(user = requester.map(|u| u.id.as_str())))]
    pub async fn build_feed(&self, requester: Option<&UserRecord>) -> Result<FeedResponse, StoreError> {
        let viewer = Viewer::new(requester);
        let personal = self.personal.build(requester).await?;

        let country_maps = self.catalog.country_maps(&self.options.official_author);

        let spotlight = self.discovery_section(Section::Spotlight, &viewer).await;
        let popular = self.discovery_section(Section::Popular, &viewer).await;
        let recent = self.discovery_section(Section::Recent, &viewer).await;

        Ok(FeedResponse {
            review_queue: personal.review_queue,
            my_maps: personal.my_maps,
            liked_maps: personal.liked_maps,
            country_maps,
            recent,
            popular,
            spotlight,
        })
    }

    /// One discovery section, personalized for `viewer`.
    pub async fn discovery_section(&self, section: Section, viewer: &Viewer<'_>) -> Vec<MapView> {
        let lookup = self.cache.get_section(section, Instant::now());

        let mut records = if lookup.is_fresh {
            lookup.records
        } else {
            match self.recompute(section).await {
                Ok(records) => {
                    self.cache.refresh(section, records.clone(), Instant::now());
                    records
                },
                Err(e) => {
                    warn!(section = %section, error = %e, "Discovery section refresh failed, serving empty");
                    self.cache.metrics().record_refresh_failure(section);
                    Vec::new()
                },
            }
        };

        // `records` is this request's own copy.
        for view in &mut records {
            view.personalize(viewer);
        }
        if section.shuffled_per_request() {
            records.shuffle(&mut rand::thread_rng());
        }

        records
    }

    /// Queries and enriches `section` from the store, without personal data.
    async fn recompute(&self, section: Section) -> Result<Vec<MapView>, StoreError> {
        let limits = self.options.limits;
        let query = match section {
            Section::Recent => MapQuery::new(MapFilter::Accepted)
                .sorted(MapSort::Newest)
                .limit(limits.recent),
            Section::Popular => MapQuery::new(MapFilter::Accepted)
                .sorted(MapSort::MostHearted)
                .limit(limits.popular),
            Section::Spotlight => MapQuery::new(MapFilter::AcceptedSpotlight),
        };

        let records = self.enricher.records().find(&query).await?;
        debug!(section = %section, records = records.len(), "Recomputed discovery section");

        Ok(self
            .enricher
            .enrich_all(records, &Viewer::anonymous(), Projection::PUBLIC, None)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use super::*;
    use crate::cache::CacheConfig;
    use crate::feed::testing::{DiscoveryDown, SwitchableRecords, epoch, map};
    use mapfeed_core::MapId;
    use mapfeed_store::MemoryStore;

    const CATALOG: &str = r#"{
        "FR": { "name": "France", "slug": "france", "maxDist": 1200 },
        "US": { "name": "United States", "slug": "usa", "maxDist": 4500 },
        "LU": { "name": "Luxembourg", "slug": "luxembourg", "maxDist": 80 }
    }"#;

    fn ids(views: &[MapView]) -> Vec<&str> {
        views.iter().map(|v| v.id.as_str()).collect()
    }

    fn store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.insert_user(UserRecord::new("u1", "alice", "s1"));
        store.insert_user(UserRecord::new("u2", "bob", "s2"));
        store.insert_map(map("A", "u1", 1, 5));
        store.insert_map(map("B", "u2", 0, 10));
        store
    }

    fn assembler(store: Arc<MemoryStore>, ttl: Duration) -> FeedAssembler {
        assembler_with_records(store.clone(), store, ttl)
    }

    fn assembler_with_records(
        records: Arc<dyn mapfeed_store::RecordStore>,
        store: Arc<MemoryStore>,
        ttl: Duration,
    ) -> FeedAssembler {
        let catalog = StaticCatalog::from_json_str(CATALOG).unwrap();
        FeedAssembler::new(
            RecordEnricher::new(records, store),
            Arc::new(SectionCache::new(CacheConfig::uniform(ttl))),
            Arc::new(catalog),
            FeedOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_popular_is_served_from_cache_within_ttl() {
        let store = store();
        let feed = assembler(store.clone(), Duration::from_secs(600));

        let first = feed.build_feed(None).await.unwrap();
        assert_eq!(ids(&first.popular), vec!["B", "A"]);
        assert_eq!(ids(&first.recent), vec!["A", "B"]);

        store.stats().reset();
        let second = feed.build_feed(None).await.unwrap();

        assert_eq!(ids(&second.popular), vec!["B", "A"]);
        assert_eq!(store.stats().record_queries(), 0);
        assert_eq!(store.stats().user_lookups(), 0);
    }

    #[tokio::test]
    async fn test_stale_section_is_recomputed_and_stored() {
        let store = store();
        let feed = assembler(store.clone(), Duration::ZERO);

        feed.build_feed(None).await.unwrap();
        let before = feed.cache().entry(Section::Recent).last_refreshed().unwrap();

        store.insert_map(map("C", "u1", 9, 0));
        store.stats().reset();
        let response = feed.build_feed(None).await.unwrap();

        assert_eq!(ids(&response.recent), vec!["C", "A", "B"]);
        assert!(store.stats().record_queries() >= 3);
        let entry = feed.cache().entry(Section::Recent);
        assert!(entry.last_refreshed().unwrap() >= before);
        assert_eq!(ids(entry.records()), vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_recent_limit_applies() {
        let store = store();
        for i in 0..30 {
            store.insert_map(map(&format!("x{i:02}"), "u1", 10 + i, 0));
        }
        let feed = assembler(store, Duration::from_secs(600));

        let response = feed.build_feed(None).await.unwrap();

        assert_eq!(response.recent.len(), 20);
        assert_eq!(response.recent[0].id.as_str(), "x29");
        assert_eq!(response.popular.len(), 32);
    }

    #[tokio::test]
    async fn test_hearted_does_not_leak_between_requesters() {
        let store = store();
        let feed = assembler(store, Duration::from_secs(600));
        let fan = UserRecord::new("u3", "carol", "s3").with_heart("B", epoch());

        let personal = feed.build_feed(Some(&fan)).await.unwrap();
        assert!(personal.popular.iter().find(|v| v.id.as_str() == "B").unwrap().hearted);
        assert!(!personal.popular.iter().find(|v| v.id.as_str() == "A").unwrap().hearted);

        for section in Section::ALL {
            assert!(feed.cache().entry(section).records().iter().all(|v| !v.hearted));
        }

        let anonymous = feed.build_feed(None).await.unwrap();
        assert!(anonymous.popular.iter().all(|v| !v.hearted));
        assert!(anonymous.recent.iter().all(|v| !v.hearted));
    }

    #[tokio::test]
    async fn test_discovery_records_carry_creator_names() {
        let store = store();
        let feed = assembler(store.clone(), Duration::from_secs(600));

        let response = feed.build_feed(None).await.unwrap();

        let names: Vec<_> = response.popular.iter().map(|v| v.created_by_name.as_deref()).collect();
        assert_eq!(names, vec![Some("bob"), Some("alice")]);
        assert!(response.popular.iter().all(|v| v.is_creator.is_none() && v.moderation.is_none()));
        assert_eq!(store.map(&MapId::from("A")).unwrap().creator_name(), Some("alice"));
    }

    #[tokio::test]
    async fn test_staff_gets_review_queue() {
        let store = store();
        let mut pending = map("P", "u1", 3, 0);
        pending.flags.accepted = false;
        pending.flags.in_review = true;
        store.insert_map(pending);
        let feed = assembler(store, Duration::from_secs(600));

        let staff = UserRecord::new("u9", "root", "s9").with_staff();
        let response = feed.build_feed(Some(&staff)).await.unwrap();
        let queue = response.review_queue.unwrap();
        assert_eq!(ids(&queue), vec!["P"]);
        assert_eq!(queue[0].is_creator, Some(false));

        let alice = UserRecord::new("u1", "alice", "s1");
        let response = feed.build_feed(Some(&alice)).await.unwrap();
        assert!(response.review_queue.is_none());
        assert_eq!(ids(&response.my_maps.unwrap()), vec!["A", "P"]);
        assert!(!ids(&response.recent).contains(&"P"));
    }

    #[tokio::test]
    async fn test_spotlight_shuffles_with_same_membership() {
        let store = store();
        for i in 0..12 {
            let mut m = map(&format!("s{i:02}"), "u1", i, 0);
            m.flags.spotlight = true;
            store.insert_map(m);
        }
        let feed = assembler(store, Duration::from_secs(600));

        let first = feed.build_feed(None).await.unwrap().spotlight;
        let expected: BTreeSet<String> = first.iter().map(|v| v.id.to_string()).collect();
        assert_eq!(expected.len(), 12);

        let mut orders = BTreeSet::new();
        orders.insert(ids(&first).join(","));
        for _ in 0..20 {
            let next = feed.build_feed(None).await.unwrap().spotlight;
            let members: BTreeSet<String> = next.iter().map(|v| v.id.to_string()).collect();
            assert_eq!(members, expected);
            orders.insert(ids(&next).join(","));
        }

        // 12! orders; 21 identical draws would be astronomically unlikely.
        assert!(orders.len() > 1);
    }

    #[tokio::test]
    async fn test_discovery_outage_serves_empty_and_caches_nothing() {
        let store = store();
        let records = Arc::new(SwitchableRecords::new(store.clone()));
        let feed = assembler_with_records(records.clone(), store.clone(), Duration::from_secs(600));
        let fan = UserRecord::new("u3", "carol", "s3").with_heart("A", epoch());

        records.set_available(false);
        let response = feed.build_feed(None).await.unwrap();

        assert!(response.recent.is_empty());
        assert!(response.popular.is_empty());
        assert!(response.spotlight.is_empty());
        assert_eq!(response.country_maps.len(), 3);
        for section in Section::ALL {
            assert!(feed.cache().entry(section).last_refreshed().is_none());
        }

        records.set_available(true);
        let response = feed.build_feed(Some(&fan)).await.unwrap();
        assert_eq!(ids(&response.popular), vec!["B", "A"]);
        assert_eq!(ids(&response.liked_maps.unwrap()), vec!["A"]);
    }

    #[tokio::test]
    async fn test_personal_sections_survive_discovery_outage() {
        let store = store();
        let records = Arc::new(DiscoveryDown(store.clone()));
        let feed = assembler_with_records(records, store, Duration::from_secs(600));
        let alice = UserRecord::new("u1", "alice", "s1").with_heart("B", epoch());

        let response = feed.build_feed(Some(&alice)).await.unwrap();

        assert!(response.recent.is_empty());
        assert!(response.popular.is_empty());
        assert!(response.spotlight.is_empty());
        assert_eq!(ids(&response.my_maps.unwrap()), vec!["A"]);
        let liked = response.liked_maps.unwrap();
        assert_eq!(ids(&liked), vec!["B"]);
        assert!(liked[0].hearted);
        for section in Section::ALL {
            assert!(feed.cache().entry(section).last_refreshed().is_none());
        }
    }

    #[tokio::test]
    async fn test_personal_store_failure_is_an_error() {
        let store = store();
        let records = Arc::new(SwitchableRecords::new(store.clone()));
        let feed = assembler_with_records(records.clone(), store, Duration::from_secs(600));
        records.set_available(false);

        let alice = UserRecord::new("u1", "alice", "s1");
        assert!(feed.build_feed(Some(&alice)).await.is_err());
    }

    #[tokio::test]
    async fn test_country_maps_sorted_by_size() {
        let feed = assembler(store(), Duration::from_secs(600));

        let response = feed.build_feed(None).await.unwrap();
        let codes: Vec<&str> = response
            .country_maps
            .iter()
            .map(|m| m.country_map.as_str())
            .collect();

        assert_eq!(codes, vec!["US", "FR", "LU"]);
        assert!(response.country_maps.iter().all(|m| m.official));
        assert!(
            response
                .country_maps
                .iter()
                .all(|m| m.created_by_name == DEFAULT_OFFICIAL_AUTHOR)
        );
    }
}
