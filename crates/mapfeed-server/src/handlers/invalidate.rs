//! Section cache administration handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use mapfeed_core::Section;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::state::AppState;

/// Response of the invalidation endpoints.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    /// Number of sections that held a refreshed entry.
    pub invalidated: usize,
    pub message: String,
}

/// DELETE /cache
#[instrument(skip_all)]
pub async fn invalidate_all(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let hit_rate = state.cache().metrics().hit_rate();
    let count = state.cache().invalidate_all();
    info!(count, hit_rate, "All discovery sections invalidated");

    Json(InvalidateResponse {
        invalidated: count,
        message: format!("Invalidated {count} discovery sections"),
    })
}

/// DELETE /cache/{section}
#[instrument(skip_all, fields(section = %section))]
pub async fn invalidate_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<InvalidateResponse>, AppError> {
    let section: Section = section
        .parse()
        .map_err(|e: mapfeed_core::DomainError| AppError::BadRequest(e.to_string()))?;

    let invalidated = usize::from(state.cache().invalidate(section));
    info!(section = %section, invalidated, "Discovery section invalidated");

    Ok(Json(InvalidateResponse {
        invalidated,
        message: format!("Invalidated section '{section}'"),
    }))
}
