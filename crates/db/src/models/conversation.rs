//! Conversation model: a two-party message thread.

use connecthub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A conversation row from the `conversations` table.
///
/// Participants are stored canonically with `user_a < user_b`, so a pair of
/// users maps to exactly one row regardless of who opened the thread.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Conversation {
    pub id: DbId,
    pub user_a: DbId,
    pub user_b: DbId,
    pub created_at: Timestamp,
    pub last_activity_at: Timestamp,
}

impl Conversation {
    /// Whether `user_id` is one of the two participants.
    pub fn has_participant(&self, user_id: DbId) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// The other participant from `user_id`'s point of view.
    pub fn peer_of(&self, user_id: DbId) -> DbId {
        if self.user_a == user_id {
            self.user_b
        } else {
            self.user_a
        }
    }
}

/// A conversation as listed in the inbox: peer info, last message preview,
/// and the caller's unread count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConversationSummary {
    pub id: DbId,
    pub peer_id: DbId,
    pub peer_display_name: String,
    pub last_message: Option<String>,
    pub unread_count: i64,
    pub last_activity_at: Timestamp,
}
