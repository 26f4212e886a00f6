//! Login session model and DTOs.

use connecthub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A login session row from the `sessions` table.
///
/// Only the SHA-256 hash of the session token is stored, so a database leak
/// does not compromise active sessions.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
