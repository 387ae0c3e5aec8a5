//! User accounts as seen by the feed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MapId, UserId};

/// Map id → time the user hearted it.
pub type HeartedMaps = HashMap<MapId, DateTime<Utc>>;

/// Coarse account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Ordinary,
    Staff,
}

/// A user record owned by the user store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    /// Opaque session secret the client presents instead of a password.
    pub secret: String,
    #[serde(default)]
    pub staff: bool,
    #[serde(default)]
    pub hearted_maps: HeartedMaps,
}

impl UserRecord {
    pub fn new(id: impl Into<UserId>, username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            secret: secret.into(),
            staff: false,
            hearted_maps: HeartedMaps::new(),
        }
    }

    /// Marks the account as staff.
    pub fn with_staff(mut self) -> Self {
        self.staff = true;
        self
    }

    /// Adds a heart for `map`.
    pub fn with_heart(mut self, map: impl Into<MapId>, at: DateTime<Utc>) -> Self {
        self.hearted_maps.insert(map.into(), at);
        self
    }

    pub fn role(&self) -> Role {
        if self.staff { Role::Staff } else { Role::Ordinary }
    }

    pub fn is_staff(&self) -> bool {
        self.role() == Role::Staff
    }

    pub fn has_hearted(&self, map: &MapId) -> bool {
        self.hearted_maps.contains_key(map)
    }

    /// Ids of every hearted map, in no particular order.
    pub fn hearted_ids(&self) -> Vec<MapId> {
        self.hearted_maps.keys().cloned().collect()
    }
}
