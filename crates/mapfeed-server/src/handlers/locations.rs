//! Official map location handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::error::AppError;
use crate::state::AppState;

/// GET /allCountries.json and /api/allCountries
#[instrument(skip_all)]
pub async fn all_countries(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.locations().all_countries().await.map(Json).map_err(|e| {
        warn!(error = %e, dir = %state.locations().dir().display(), "Cannot read allCountries.json");
        AppError::Internal("Error reading allCountries.json".to_string())
    })
}

/// GET /countryLocations/{country} and /api/countryLocations/{country}
#[instrument(skip_all, fields(country = %country))]
pub async fn country_locations(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Value>, AppError> {
    match state.locations().country(&country).await {
        Ok(Some(locations)) => Ok(Json(locations)),
        Ok(None) => Err(AppError::NotFound("Country not found".to_string())),
        Err(e) => {
            warn!(error = %e, "Cannot read country locations");
            Err(AppError::Internal("Failed to fetch country location".to_string()))
        },
    }
}
