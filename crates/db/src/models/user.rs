//! User entity model and DTOs.

use connecthub_core::suggestions::Candidate;
use connecthub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub bio: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub bio: String,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

impl Candidate for UserResponse {
    fn candidate_id(&self) -> DbId {
        self.id
    }
    fn signed_up_at(&self) -> Timestamp {
        self.created_at
    }
}

/// DTO for creating a new user.
pub struct CreateUser {
    pub email: String,
    pub display_name: String,
    pub bio: String,
    pub password_hash: String,
}

/// DTO for profile edits. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub bio: Option<String>,
}
