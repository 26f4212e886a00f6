//! Follow edge model: directed follower -> followee relationships.

use connecthub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// `status` value for an unresolved request.
pub const STATUS_PENDING: &str = "pending";
/// `status` value for an approved edge.
pub const STATUS_ACCEPTED: &str = "accepted";

/// A follow edge row from the `follow_edges` table.
///
/// Lifecycle: created as `pending`, transitions to `accepted` on approval,
/// or is deleted on rejection. The (follower_id, followee_id) pair is unique.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FollowEdge {
    pub id: DbId,
    pub follower_id: DbId,
    pub followee_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub responded_at: Option<Timestamp>,
}

impl FollowEdge {
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }
}

/// A pending request as shown in the moderation view: the edge plus the
/// requester's public info.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PendingRequest {
    pub id: DbId,
    pub follower_id: DbId,
    pub follower_display_name: String,
    pub follower_bio: String,
    pub created_at: Timestamp,
}
