//! JSON seed documents for the in-memory store.

use std::path::Path;

use mapfeed_core::{MapRecord, UserRecord};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Initial contents of a `MemoryStore`.
///
/// ```json
/// { "maps": [ ... ], "users": [ ... ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub maps: Vec<MapRecord>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl SeedData {
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and decodes a seed file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&content).map_err(|e| StoreError::parse(path, e.to_string()))
    }
}
