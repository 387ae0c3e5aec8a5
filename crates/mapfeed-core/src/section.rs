//! Discovery sections of the feed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the three cached discovery categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Latest accepted maps.
    Recent,
    /// Most hearted accepted maps.
    Popular,
    /// Editorially curated maps, served in random order.
    Spotlight,
}

impl Section {
    /// Every section, in the order the feed computes them.
    pub const ALL: [Section; 3] = [Section::Spotlight, Section::Popular, Section::Recent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Popular => "popular",
            Self::Spotlight => "spotlight",
        }
    }

    /// Dense index, stable for the lifetime of the process.
    pub fn index(&self) -> usize {
        match self {
            Self::Recent => 0,
            Self::Popular => 1,
            Self::Spotlight => 2,
        }
    }

    /// Whether the served order is randomized on every read.
    pub fn shuffled_per_request(&self) -> bool {
        matches!(self, Self::Spotlight)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(Self::Recent),
            "popular" => Ok(Self::Popular),
            "spotlight" => Ok(Self::Spotlight),
            _ => Err(DomainError::UnknownSection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Popular".parse::<Section>().unwrap(), Section::Popular);
        assert_eq!(" recent ".parse::<Section>().unwrap(), Section::Recent);
        assert!("hot".parse::<Section>().is_err());
    }

    #[test]
    fn indices_are_dense_and_unique() {
        let mut seen: Vec<usize> = Section::ALL.iter().map(Section::index).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn only_spotlight_is_shuffled() {
        assert!(Section::Spotlight.shuffled_per_request());
        assert!(!Section::Popular.shuffled_per_request());
        assert!(!Section::Recent.shuffled_per_request());
    }
}
