//! Repository for the `posts` and `post_likes` tables.

use connecthub_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{FeedPost, Post};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author_id, content, media, created_at";

/// Feed projection: post row plus author name and like state for a viewer
/// bound as `$1`.
const FEED_SELECT: &str = "SELECT p.id, p.author_id,
        u.display_name AS author_display_name,
        p.content, p.media,
        (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS like_count,
        EXISTS (SELECT 1 FROM post_likes l
                 WHERE l.post_id = p.id AND l.user_id = $1) AS viewer_liked,
        p.created_at
     FROM posts p
     JOIN users u ON u.id = p.author_id";

/// Provides operations on posts and their like sets.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        content: &str,
        media: &[String],
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (author_id, content, media)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(author_id)
            .bind(content)
            .bind(media)
            .fetch_one(pool)
            .await
    }

    /// Find a post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All posts by one author, newest first, with like state for `viewer_id`.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
        viewer_id: DbId,
    ) -> Result<Vec<FeedPost>, sqlx::Error> {
        let query = format!(
            "{FEED_SELECT}
             WHERE p.author_id = $2
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, FeedPost>(&query)
            .bind(viewer_id)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Every post with like state for `viewer_id`, newest first with id as
    /// the deterministic tie-break.
    pub async fn list_feed(pool: &PgPool, viewer_id: DbId) -> Result<Vec<FeedPost>, sqlx::Error> {
        let query = format!("{FEED_SELECT} ORDER BY p.created_at DESC, p.id DESC");
        sqlx::query_as::<_, FeedPost>(&query)
            .bind(viewer_id)
            .fetch_all(pool)
            .await
    }

    /// Flip like membership for `(post_id, user_id)`.
    ///
    /// The insert-or-delete against the composite primary key is the atomic
    /// check-and-flip: two toggles in sequence return to the original state,
    /// and concurrent toggles by the same user can never produce a duplicate
    /// like row. Returns the resulting state (`true` = now liked).
    pub async fn toggle_like(
        pool: &PgPool,
        post_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO post_likes (post_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT pk_post_likes DO NOTHING",
        )
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            return Ok(true);
        }

        sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(false)
    }

    /// Number of likes on a post.
    pub async fn like_count(pool: &PgPool, post_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
