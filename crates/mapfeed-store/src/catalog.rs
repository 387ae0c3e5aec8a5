//! Loading of the official country map catalog.

use std::path::Path;

use mapfeed_core::StaticCatalog;
use tracing::info;

use crate::error::StoreError;

/// Reads the official catalog from a JSON object file keyed by country code.
///
/// The catalog is read once at startup and stays immutable afterwards.
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<StaticCatalog, StoreError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let catalog = StaticCatalog::from_json_str(&content)
        .map_err(|e| StoreError::parse(path, e.to_string()))?;

    info!(maps = catalog.len(), path = %path.display(), "Official catalog loaded");
    Ok(catalog)
}
