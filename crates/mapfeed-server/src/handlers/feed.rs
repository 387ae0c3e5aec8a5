//! Feed endpoint handler.

use axum::{Json, extract::State};
use mapfeed_core::FeedResponse;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::extractors::SecretBody;
use crate::state::AppState;

/// POST /api/map/mapHome
#[instrument(skip_all)]
pub async fn map_home(
    State(state): State<AppState>,
    body: SecretBody,
) -> Result<Json<FeedResponse>, AppError> {
    let requester = state.resolve_requester(body.secret()).await?;
    let feed = state.feed().build_feed(requester.as_ref()).await?;

    info!(
        anonymous = requester.is_none(),
        recent = feed.recent.len(),
        popular = feed.popular.len(),
        spotlight = feed.spotlight.len(),
        "Feed served"
    );

    Ok(Json(feed))
}
