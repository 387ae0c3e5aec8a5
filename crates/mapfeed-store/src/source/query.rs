//! Map query types.

use std::cmp::Ordering;

use mapfeed_core::{MapId, MapRecord, UserId};

/// Which records a query selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapFilter {
    /// Maps waiting for staff review.
    InReview,
    /// Maps created by the given user.
    CreatedBy(UserId),
    /// Maps whose id is in the set.
    IdIn(Vec<MapId>),
    /// Accepted maps.
    Accepted,
    /// Accepted maps that are also in the spotlight.
    AcceptedSpotlight,
    /// The map with the given slug.
    Slug(String),
}

impl MapFilter {
    /// Returns true if `record` is selected by this filter.
    pub fn matches(&self, record: &MapRecord) -> bool {
        match self {
            Self::InReview => record.flags.in_review,
            Self::CreatedBy(user) => &record.created_by == user,
            Self::IdIn(ids) => ids.contains(&record.id),
            Self::Accepted => record.flags.accepted,
            Self::AcceptedSpotlight => record.flags.accepted && record.flags.spotlight,
            Self::Slug(slug) => &record.slug == slug,
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InReview => "in_review",
            Self::CreatedBy(_) => "created_by",
            Self::IdIn(_) => "id_in",
            Self::Accepted => "accepted",
            Self::AcceptedSpotlight => "accepted_spotlight",
            Self::Slug(_) => "slug",
        }
    }
}

/// Result ordering requested from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSort {
    /// Creation time, newest first.
    Newest,
    /// Heart count, highest first.
    MostHearted,
}

impl MapSort {
    /// Total order used by stores that sort in process.
    ///
    /// Ties fall back to newest first and then to ascending id, so equal
    /// keys still produce a deterministic order.
    pub fn compare(&self, a: &MapRecord, b: &MapRecord) -> Ordering {
        let newest = || b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id));
        match self {
            Self::Newest => newest(),
            Self::MostHearted => b.hearts.cmp(&a.hearts).then_with(newest),
        }
    }
}

/// A query against the record store.
///
/// # Example
///
/// ```
/// use mapfeed_store::{MapFilter, MapQuery, MapSort};
///
/// let query = MapQuery::new(MapFilter::Accepted)
///     .sorted(MapSort::MostHearted)
///     .limit(100);
/// assert_eq!(query.sort(), Some(MapSort::MostHearted));
/// assert_eq!(query.max_results(), Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapQuery {
    filter: MapFilter,
    sort: Option<MapSort>,
    limit: Option<usize>,
}

impl MapQuery {
    /// Creates an unsorted, unbounded query.
    pub fn new(filter: MapFilter) -> Self {
        Self {
            filter,
            sort: None,
            limit: None,
        }
    }

    /// Sets the result ordering.
    pub fn sorted(mut self, sort: MapSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Bounds the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(&self) -> &MapFilter {
        &self.filter
    }

    pub fn sort(&self) -> Option<MapSort> {
        self.sort
    }

    pub fn max_results(&self) -> Option<usize> {
        self.limit
    }

    /// Evaluates the query over an in-memory collection.
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a MapRecord>) -> Vec<MapRecord> {
        let mut selected: Vec<MapRecord> = records
            .into_iter()
            .filter(|r| self.filter.matches(r))
            .cloned()
            .collect();

        if let Some(sort) = self.sort {
            selected.sort_by(|a, b| sort.compare(a, b));
        }
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }

        selected
    }
}
