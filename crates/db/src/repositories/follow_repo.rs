//! Repository for the `follow_edges` table.
//!
//! State machine per edge: inserted as `pending`, then either updated to
//! `accepted` or deleted on rejection. Both transitions are guarded on the
//! current status so a double-accept race loses cleanly at the database.

use connecthub_core::types::DbId;
use sqlx::PgPool;

use crate::models::follow_edge::{FollowEdge, PendingRequest};
use crate::models::user::UserResponse;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, follower_id, followee_id, status, created_at, responded_at";

/// Provides operations on the follow graph.
pub struct FollowRepo;

impl FollowRepo {
    /// Create a pending follow request.
    ///
    /// Returns `None` when an edge (pending or accepted) already exists for
    /// the ordered pair; the unique pair constraint makes this atomic.
    pub async fn create_request(
        pool: &PgPool,
        follower_id: DbId,
        followee_id: DbId,
    ) -> Result<Option<FollowEdge>, sqlx::Error> {
        let query = format!(
            "INSERT INTO follow_edges (follower_id, followee_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_follow_edges_pair DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FollowEdge>(&query)
            .bind(follower_id)
            .bind(followee_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an edge by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FollowEdge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM follow_edges WHERE id = $1");
        sqlx::query_as::<_, FollowEdge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Accept a pending request. The status guard makes the transition
    /// atomic: returns `None` if the edge is gone or already resolved.
    pub async fn accept(pool: &PgPool, id: DbId) -> Result<Option<FollowEdge>, sqlx::Error> {
        let query = format!(
            "UPDATE follow_edges
             SET status = 'accepted', responded_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FollowEdge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reject a pending request by deleting the edge, which lets the
    /// requester ask again later. Returns `true` if a row was deleted.
    pub async fn reject(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM follow_edges WHERE id = $1 AND status = 'pending'")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Pending requests awaiting `followee_id`'s review, oldest first
    /// (first-come review order), with requester info.
    pub async fn list_pending_for(
        pool: &PgPool,
        followee_id: DbId,
    ) -> Result<Vec<PendingRequest>, sqlx::Error> {
        sqlx::query_as::<_, PendingRequest>(
            "SELECT f.id, f.follower_id,
                    u.display_name AS follower_display_name,
                    u.bio AS follower_bio,
                    f.created_at
             FROM follow_edges f
             JOIN users u ON u.id = f.follower_id
             WHERE f.followee_id = $1 AND f.status = 'pending'
             ORDER BY f.created_at ASC, f.id ASC",
        )
        .bind(followee_id)
        .fetch_all(pool)
        .await
    }

    /// Users connected to `user_id`: an accepted edge exists in either
    /// direction.
    pub async fn list_connections(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserResponse>, sqlx::Error> {
        sqlx::query_as::<_, UserResponse>(
            "SELECT u.id, u.email, u.display_name, u.bio, u.created_at
             FROM users u
             JOIN follow_edges f
               ON (f.follower_id = $1 AND f.followee_id = u.id)
               OR (f.followee_id = $1 AND f.follower_id = u.id)
             WHERE f.status = 'accepted'
             ORDER BY u.display_name ASC, u.id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Whether an accepted edge exists between `a` and `b` in at least one
    /// direction.
    pub async fn are_connected(pool: &PgPool, a: DbId, b: DbId) -> Result<bool, sqlx::Error> {
        let (connected,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM follow_edges
                  WHERE status = 'accepted'
                    AND ((follower_id = $1 AND followee_id = $2)
                      OR (follower_id = $2 AND followee_id = $1)))",
        )
        .bind(a)
        .bind(b)
        .fetch_one(pool)
        .await?;
        Ok(connected)
    }
}
