//! Requester-specific feed sections.

use mapfeed_core::{MapView, Projection, UserRecord, Viewer};
use mapfeed_store::{MapFilter, MapQuery, MapSort, StoreError};
use tracing::debug;

use super::enrich::RecordEnricher;

/// The up-to-three personal sections of a feed.
///
/// `None` means the section is omitted from the response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalSections {
    pub review_queue: Option<Vec<MapView>>,
    pub my_maps: Option<Vec<MapView>>,
    pub liked_maps: Option<Vec<MapView>>,
}

/// Builds `reviewQueue`, `myMaps` and `likedMaps` for a resolved user.
#[derive(Clone)]
pub struct PersonalViewBuilder {
    enricher: RecordEnricher,
}

impl PersonalViewBuilder {
    pub fn new(enricher: RecordEnricher) -> Self {
        Self { enricher }
    }

    /// Anonymous requesters get nothing and cause no queries.
    ///
    /// # Errors
    ///
    /// Any store failure in the three queries is returned as is.
    pub async fn build(&self, user: Option<&UserRecord>) -> Result<PersonalSections, StoreError> {
        let Some(user) = user else {
            return Ok(PersonalSections::default());
        };

        let (review_queue, my_maps, liked_maps) = futures::try_join!(
            self.review_queue(user),
            self.my_maps(user),
            self.liked_maps(user),
        )?;

        debug!(
            user = %user.id,
            review = review_queue.len(),
            mine = my_maps.len(),
            liked = liked_maps.len(),
            "Personal sections built"
        );

        Ok(PersonalSections {
            review_queue: non_empty(review_queue),
            my_maps: non_empty(my_maps),
            liked_maps: non_empty(liked_maps),
        })
    }

    /// Staff only: every map waiting for review, newest first.
    async fn review_queue(&self, user: &UserRecord) -> Result<Vec<MapView>, StoreError> {
        if !user.is_staff() {
            return Ok(Vec::new());
        }

        let query = MapQuery::new(MapFilter::InReview).sorted(MapSort::Newest);
        let records = self.enricher.records().find(&query).await?;
        Ok(self
            .enricher
            .enrich_all(records, &Viewer::new(Some(user)), Projection::MODERATED, None)
            .await)
    }

    /// The user's own maps, oldest first.
    async fn my_maps(&self, user: &UserRecord) -> Result<Vec<MapView>, StoreError> {
        let query = MapQuery::new(MapFilter::CreatedBy(user.id.clone()));
        let mut records = self.enricher.records().find(&query).await?;
        // The store only sorts newest first.
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        Ok(self
            .enricher
            .enrich_all(
                records,
                &Viewer::new(Some(user)),
                Projection::MODERATED,
                Some(user),
            )
            .await)
    }

    /// Maps the user hearted, newest first.
    async fn liked_maps(&self, user: &UserRecord) -> Result<Vec<MapView>, StoreError> {
        let ids = user.hearted_ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = MapQuery::new(MapFilter::IdIn(ids)).sorted(MapSort::Newest);
        let records = self.enricher.records().find(&query).await?;
        let projection = if user.is_staff() {
            Projection::MODERATED
        } else {
            Projection::WITH_CREATOR
        };

        Ok(self
            .enricher
            .enrich_all(records, &Viewer::new(Some(user)), projection, None)
            .await)
    }
}

fn non_empty(views: Vec<MapView>) -> Option<Vec<MapView>> {
    (!views.is_empty()).then_some(views)
}
