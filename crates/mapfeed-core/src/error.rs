//! Error types for the mapfeed domain.
//!
//! Storage failures live in `mapfeed-store` and HTTP mapping lives in
//! `mapfeed-server`; this enum only covers problems detectable from
//! domain values alone.

use thiserror::Error;

/// Main error type for domain-level operations.
///
/// # Example
///
/// ```
/// use mapfeed_core::{DomainError, Section};
///
/// let err = "trending".parse::<Section>().unwrap_err();
/// assert!(matches!(err, DomainError::UnknownSection(_)));
/// assert_eq!(err.to_string(), "unknown discovery section 'trending'");
/// ```
#[derive(Debug, Error)]
pub enum DomainError {
    /// The name does not denote one of the discovery sections.
    #[error("unknown discovery section '{0}'")]
    UnknownSection(String),

    /// The official catalog document could not be decoded.
    #[error("invalid official catalog: {0}")]
    InvalidCatalog(#[from] serde_json::Error),
}

/// Result alias for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
