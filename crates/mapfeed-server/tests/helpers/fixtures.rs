//! Seeded stores and routers for the integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::{Duration as Days, TimeZone, Utc};
use mapfeed_core::{MapRecord, StaticCatalog, UserRecord};
use mapfeed_server::{AppState, CacheConfig, FeedOptions, create_router};
use mapfeed_store::MemoryStore;

use super::client::TestClient;

pub const ALICE_SECRET: &str = "secret-alice";
pub const BOB_SECRET: &str = "secret-bob";
pub const STAFF_SECRET: &str = "secret-staff";
pub const FAN_SECRET: &str = "secret-fan";

pub const CATALOG: &str = r#"{
    "FR": { "name": "France", "slug": "france", "maxDist": 1200, "longDescription": "All of France" },
    "US": { "name": "United States", "slug": "usa", "maxDist": 4500 },
    "LU": { "name": "Luxembourg", "slug": "luxembourg", "maxDist": 80 }
}"#;

fn map(id: &str, creator: &str, day: i64, hearts: u32) -> MapRecord {
    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut record = MapRecord::new(id, format!("Map {id}"), creator, epoch + Days::days(day));
    record.hearts = hearts;
    record.flags.accepted = true;
    record
}

/// A: alice, 5 hearts. B: bob, 10 hearts, in the spotlight. P: alice, in review.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let hearted_at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

    store.insert_user(UserRecord::new("u1", "alice", ALICE_SECRET));
    store.insert_user(UserRecord::new("u2", "bob", BOB_SECRET));
    store.insert_user(UserRecord::new("u9", "root", STAFF_SECRET).with_staff());
    store.insert_user(UserRecord::new("u3", "carol", FAN_SECRET).with_heart("B", hearted_at));

    let mut a = map("A", "u1", 1, 5);
    a.slug = "alpine-passes".into();
    store.insert_map(a);

    let mut b = map("B", "u2", 0, 10);
    b.flags.spotlight = true;
    store.insert_map(b);

    let mut pending = map("P", "u1", 3, 0);
    pending.slug = "draft".into();
    pending.flags.accepted = false;
    pending.flags.in_review = true;
    store.insert_map(pending);

    store
}

pub fn state(store: Arc<MemoryStore>, ttl: Duration) -> AppState {
    AppState::from_memory_store(
        store,
        StaticCatalog::from_json_str(CATALOG).unwrap(),
        CacheConfig::uniform(ttl),
        FeedOptions::default(),
    )
}

pub fn router(store: Arc<MemoryStore>) -> Router {
    create_router(state(store, Duration::from_secs(600)))
}

/// Client over the seeded store, with a 10 minute TTL.
pub fn client() -> TestClient {
    TestClient::new(router(seeded_store()))
}

/// Data directory with `allCountries.json` and a `FR` location file.
pub fn location_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("allCountries.json"), r#"[[48.85, 2.35], [40.71, -74.0]]"#).unwrap();
    std::fs::create_dir(dir.path().join("countryLocations")).unwrap();
    std::fs::write(
        dir.path().join("countryLocations").join("FR.json"),
        r#"{ "locations": [ { "lat": 48.85, "lng": 2.35 } ] }"#,
    )
    .unwrap();
    dir
}

/// Client serving official locations from `dir`.
pub fn client_with_locations(dir: &std::path::Path) -> TestClient {
    let state = state(seeded_store(), Duration::from_secs(600))
        .with_locations(mapfeed_store::LocationFiles::new(dir));
    TestClient::new(create_router(state))
}
