//! Read-only access to the official maps' location files.
//!
//! Layout under the data directory:
//!
//! ```text
//! allCountries.json
//! countryLocations/<COUNTRY>.json
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;

const ALL_COUNTRIES_FILE: &str = "allCountries.json";
const COUNTRY_DIR: &str = "countryLocations";

/// Directory of static location documents.
///
/// Files are read on every call; nothing is cached.
#[derive(Debug, Clone)]
pub struct LocationFiles {
    dir: PathBuf,
}

impl LocationFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The combined location document of every country.
    pub async fn all_countries(&self) -> Result<Value, StoreError> {
        read_json(&self.dir.join(ALL_COUNTRIES_FILE)).await
    }

    /// Location document of one country, `None` if there is none.
    ///
    /// Codes other than ASCII letters, digits, `-` and `_` never match a file.
    pub async fn country(&self, code: &str) -> Result<Option<Value>, StoreError> {
        if !is_valid_code(code) {
            debug!(code, "Rejected country code");
            return Ok(None);
        }

        let path = self.dir.join(COUNTRY_DIR).join(format!("{code}.json"));
        match read_json(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Default for LocationFiles {
    fn default() -> Self {
        Self::new("public")
    }
}

fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

async fn read_json(path: &Path) -> Result<Value, StoreError> {
    let content = tokio::fs::read(path).await?;
    serde_json::from_slice(&content).map_err(|e| StoreError::parse(path, e.to_string()))
}
