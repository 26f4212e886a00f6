//! Repository for the `conversations` table.

use connecthub_core::types::DbId;
use sqlx::PgPool;

use crate::models::conversation::{Conversation, ConversationSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_a, user_b, created_at, last_activity_at";

/// Provides operations on two-party conversations.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Fetch the conversation for a participant pair, creating it if absent.
    ///
    /// The pair is canonicalized (`user_a < user_b`) before the upsert, so
    /// the unique pair constraint guarantees one conversation per pair no
    /// matter which side opens it or how many requests race.
    pub async fn get_or_create(
        pool: &PgPool,
        user_x: DbId,
        user_y: DbId,
    ) -> Result<Conversation, sqlx::Error> {
        let (a, b) = if user_x < user_y {
            (user_x, user_y)
        } else {
            (user_y, user_x)
        };

        let insert = format!(
            "INSERT INTO conversations (user_a, user_b)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_conversations_pair DO NOTHING
             RETURNING {COLUMNS}"
        );
        if let Some(created) = sqlx::query_as::<_, Conversation>(&insert)
            .bind(a)
            .bind(b)
            .fetch_optional(pool)
            .await?
        {
            return Ok(created);
        }

        let select = format!("SELECT {COLUMNS} FROM conversations WHERE user_a = $1 AND user_b = $2");
        sqlx::query_as::<_, Conversation>(&select)
            .bind(a)
            .bind(b)
            .fetch_one(pool)
            .await
    }

    /// Find a conversation by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM conversations WHERE id = $1");
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Inbox listing for `user_id`: most recent activity first, each row
    /// carrying the peer's name, the latest message body, and how many
    /// messages from the peer the caller has not read yet.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ConversationSummary>, sqlx::Error> {
        sqlx::query_as::<_, ConversationSummary>(
            "SELECT c.id,
                    CASE WHEN c.user_a = $1 THEN c.user_b ELSE c.user_a END AS peer_id,
                    u.display_name AS peer_display_name,
                    (SELECT m.body FROM messages m
                      WHERE m.conversation_id = c.id
                      ORDER BY m.sent_at DESC, m.id DESC
                      LIMIT 1) AS last_message,
                    (SELECT COUNT(*) FROM messages m
                      WHERE m.conversation_id = c.id
                        AND m.sender_id <> $1
                        AND NOT EXISTS (SELECT 1 FROM message_reads r
                                         WHERE r.message_id = m.id
                                           AND r.user_id = $1)) AS unread_count,
                    c.last_activity_at
             FROM conversations c
             JOIN users u
               ON u.id = CASE WHEN c.user_a = $1 THEN c.user_b ELSE c.user_a END
             WHERE c.user_a = $1 OR c.user_b = $1
             ORDER BY c.last_activity_at DESC, c.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
