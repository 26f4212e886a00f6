//! Message model and DTOs.

use connecthub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A message row from the `messages` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: DbId,
    pub conversation_id: DbId,
    pub sender_id: DbId,
    pub body: String,
    pub sent_at: Timestamp,
}

/// A message plus the ids of users who have read it.
#[derive(Debug, Clone, Serialize)]
pub struct MessageWithReads {
    #[serde(flatten)]
    pub message: Message,
    pub read_by: Vec<DbId>,
}

/// Request body for sending a message.
#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub body: String,
}
