//! Server configuration: built-in defaults, then an optional TOML file, then
//! `MAPFEED__SECTION__KEY` environment variables.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

use crate::cache::CacheConfig;
use crate::feed::{DEFAULT_OFFICIAL_AUTHOR, DiscoveryLimits, FeedOptions};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "MAPFEED_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "mapfeed.toml";
const ENV_PREFIX: &str = "MAPFEED";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub cache: CacheSettings,
    pub discovery: DiscoverySettings,
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub store: StoreSettings,
    pub locations: LocationSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Section TTLs in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub recent_ttl_ms: u64,
    pub popular_ttl_ms: u64,
    pub spotlight_ttl_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySettings {
    pub recent_limit: usize,
    pub popular_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// JSON object of official maps keyed by country code. No file means an
    /// empty catalog.
    pub path: Option<PathBuf>,
    pub official_author: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    /// JSON seed for the in-memory store.
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSettings {
    /// Holds `allCountries.json` and `countryLocations/<CODE>.json`.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Settings {
    /// Loads settings from the file named by `MAPFEED_CONFIG` (or
    /// `mapfeed.toml`, if present) and the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let required = explicit.is_some();
        let path = explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::build(Some((&path, required)), None)
    }

    /// Loads settings from an optional file and an explicit environment map
    /// instead of the process environment.
    pub fn load_from(file: Option<&Path>, env: HashMap<String, String>) -> Result<Self, SettingsError> {
        Self::build(file.map(|p| (p, true)), Some(env))
    }

    fn build(file: Option<(&Path, bool)>, env: Option<HashMap<String, String>>) -> Result<Self, SettingsError> {
        let defaults = CacheConfig::default();
        let limits = DiscoveryLimits::default();

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("cache.recent_ttl_ms", defaults.recent_ttl.as_millis() as i64)?
            .set_default("cache.popular_ttl_ms", defaults.popular_ttl.as_millis() as i64)?
            .set_default("cache.spotlight_ttl_ms", defaults.spotlight_ttl.as_millis() as i64)?
            .set_default("discovery.recent_limit", limits.recent as i64)?
            .set_default("discovery.popular_limit", limits.popular as i64)?
            .set_default("catalog.official_author", DEFAULT_OFFICIAL_AUTHOR)?
            .set_default("locations.dir", "public")?
            .set_default("log.level", "info")?;

        if let Some((path, required)) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(required));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.discovery.recent_limit == 0 {
            return Err(SettingsError::Invalid {
                key: "discovery.recent_limit",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.discovery.popular_limit == 0 {
            return Err(SettingsError::Invalid {
                key: "discovery.popular_limit",
                reason: "must be greater than zero".to_string(),
            });
        }
        self.addr().map(|_| ())
    }

    pub fn addr(&self) -> Result<SocketAddr, SettingsError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| SettingsError::Invalid {
                key: "server.host",
                reason: e.to_string(),
            })
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            recent_ttl: Duration::from_millis(self.cache.recent_ttl_ms),
            popular_ttl: Duration::from_millis(self.cache.popular_ttl_ms),
            spotlight_ttl: Duration::from_millis(self.cache.spotlight_ttl_ms),
        }
    }

    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            limits: DiscoveryLimits {
                recent: self.discovery.recent_limit,
                popular: self.discovery.popular_limit,
            },
            official_author: self.catalog.official_author.clone(),
        }
    }
}
