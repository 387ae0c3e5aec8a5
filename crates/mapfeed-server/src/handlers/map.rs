//! Map page handler.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::SecretBody;
use crate::feed::MapPage;
use crate::state::AppState;

/// POST /api/map/{slug}
#[instrument(skip_all, fields(slug = %slug))]
pub async fn map_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: SecretBody,
) -> Result<Json<MapPage>, AppError> {
    let requester = state.resolve_requester(body.secret()).await?;

    state
        .pages()
        .find(&slug, requester.as_ref())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Map not found".to_string()))
}
