//! The requester a projection is computed for.

use crate::map::MapRecord;
use crate::types::{MapId, UserId};
use crate::user::UserRecord;

/// Borrowed view of the (possibly anonymous) requester.
///
/// Everything personal in a projection (`hearted`, `isCreator`, visibility
/// of moderation fields) is derived from this value and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewer<'a> {
    user: Option<&'a UserRecord>,
}

impl<'a> Viewer<'a> {
    pub fn new(user: Option<&'a UserRecord>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn user(&self) -> Option<&'a UserRecord> {
        self.user
    }

    pub fn user_id(&self) -> Option<&'a UserId> {
        self.user.map(|u| &u.id)
    }

    pub fn is_staff(&self) -> bool {
        self.user.is_some_and(UserRecord::is_staff)
    }

    /// Anonymous viewers have hearted nothing.
    pub fn has_hearted(&self, map: &MapId) -> bool {
        self.user.is_some_and(|u| u.has_hearted(map))
    }

    pub fn is_creator_of(&self, record: &MapRecord) -> bool {
        self.user_id() == Some(&record.created_by)
    }

    /// Owners and staff may see moderation state and unaccepted maps.
    pub fn can_moderate(&self, record: &MapRecord) -> bool {
        self.is_staff() || self.is_creator_of(record)
    }
}
