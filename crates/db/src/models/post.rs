//! Post entity model and DTOs.

use connecthub_core::feed::FeedItem;
use connecthub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A post row from the `posts` table.
///
/// `media` holds opaque blob references (the backend never stores bytes).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub media: Vec<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new post.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub content: String,
    #[serde(default)]
    pub media: Vec<String>,
}

/// A post as rendered in the feed: the row plus author info and like state
/// for the viewer.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedPost {
    pub id: DbId,
    pub author_id: DbId,
    pub author_display_name: String,
    pub content: String,
    pub media: Vec<String>,
    pub like_count: i64,
    pub viewer_liked: bool,
    pub created_at: Timestamp,
}

impl FeedItem for FeedPost {
    fn author_id(&self) -> DbId {
        self.author_id
    }
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
    fn item_id(&self) -> DbId {
        self.id
    }
}
