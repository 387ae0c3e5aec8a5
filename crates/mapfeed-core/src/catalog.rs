//! The static catalog of official country maps.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Descriptor of one official country map.
///
/// Fields the feed does not interpret are kept in `extra` and passed
/// through to the client untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialMap {
    #[serde(default)]
    pub country_code: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    /// Largest distance between two locations of the map, used for ordering.
    #[serde(default)]
    pub max_dist: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An official map as listed in the feed's `countryMaps` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryMapView {
    #[serde(flatten)]
    pub map: OfficialMap,
    pub created_by_name: String,
    pub official: bool,
    #[serde(rename = "countryMap")]
    pub country_map: String,
    pub description_short: String,
}

impl CountryMapView {
    pub fn new(map: &OfficialMap, author: &str) -> Self {
        Self {
            created_by_name: author.to_string(),
            official: true,
            country_map: map.country_code.clone(),
            description_short: map.short_description.clone(),
            map: map.clone(),
        }
    }
}

/// Single official map page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfficialMapPage {
    #[serde(flatten)]
    pub view: CountryMapView,
    pub description_long: String,
    pub in_review: bool,
    pub rejected: bool,
}

/// Immutable mapping of country code → official map, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    maps: BTreeMap<String, OfficialMap>,
}

impl StaticCatalog {
    pub fn new(maps: impl IntoIterator<Item = OfficialMap>) -> Self {
        Self {
            maps: maps
                .into_iter()
                .map(|m| (m.country_code.clone(), m))
                .collect(),
        }
    }

    /// Parses a JSON object keyed by country code.
    ///
    /// Descriptors without a `countryCode` inherit their key.
    ///
    /// # Example
    ///
    /// ```
    /// use mapfeed_core::StaticCatalog;
    ///
    /// let catalog = StaticCatalog::from_json_str(
    ///     r#"{ "FR": { "name": "France", "slug": "france", "maxDist": 1200 } }"#,
    /// ).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// assert_eq!(catalog.get("FR").unwrap().country_code, "FR");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, OfficialMap> = serde_json::from_str(json)?;
        let maps = raw
            .into_iter()
            .map(|(code, mut map)| {
                if map.country_code.is_empty() {
                    map.country_code = code.clone();
                }
                (code, map)
            })
            .collect();
        Ok(Self { maps })
    }

    pub fn get(&self, country_code: &str) -> Option<&OfficialMap> {
        self.maps.get(country_code)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&OfficialMap> {
        self.maps.values().find(|m| m.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// The `countryMaps` feed section: largest maps first.
    pub fn country_maps(&self, author: &str) -> Vec<CountryMapView> {
        let mut views: Vec<CountryMapView> = self
            .maps
            .values()
            .map(|m| CountryMapView::new(m, author))
            .collect();
        views.sort_by(|a, b| by_max_dist_desc(&a.map, &b.map));
        views
    }

    /// Page for the official map with `slug`, if there is one.
    pub fn page(&self, slug: &str, author: &str) -> Option<OfficialMapPage> {
        self.find_by_slug(slug).map(|m| OfficialMapPage {
            view: CountryMapView::new(m, author),
            description_long: m.long_description.clone(),
            in_review: false,
            rejected: false,
        })
    }
}

fn by_max_dist_desc(a: &OfficialMap, b: &OfficialMap) -> Ordering {
    b.max_dist
        .total_cmp(&a.max_dist)
        .then_with(|| a.country_code.cmp(&b.country_code))
}
