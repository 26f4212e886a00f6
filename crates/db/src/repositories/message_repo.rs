//! Repository for the `messages` and `message_reads` tables.

use std::collections::HashMap;

use connecthub_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{Message, MessageWithReads};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, conversation_id, sender_id, body, sent_at";

/// Provides operations on messages and read receipts.
pub struct MessageRepo;

impl MessageRepo {
    /// Append a message to a conversation and bump its `last_activity_at`,
    /// in one transaction.
    ///
    /// `sent_at` is clamped to the conversation's latest message timestamp
    /// so it never goes backwards within a thread, even across clock
    /// adjustments.
    pub async fn send(
        pool: &PgPool,
        conversation_id: DbId,
        sender_id: DbId,
        body: &str,
    ) -> Result<Message, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO messages (conversation_id, sender_id, body, sent_at)
             VALUES ($1, $2, $3,
                     GREATEST(NOW(), COALESCE((SELECT MAX(sent_at) FROM messages
                                                WHERE conversation_id = $1), NOW())))
             RETURNING {COLUMNS}"
        );
        let message = sqlx::query_as::<_, Message>(&insert)
            .bind(conversation_id)
            .bind(sender_id)
            .bind(body)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE conversations SET last_activity_at = $2 WHERE id = $1")
            .bind(conversation_id)
            .bind(message.sent_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(message)
    }

    /// Full history of a conversation, oldest first, with read receipts.
    pub async fn list_for_conversation(
        pool: &PgPool,
        conversation_id: DbId,
    ) -> Result<Vec<MessageWithReads>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE conversation_id = $1
             ORDER BY sent_at ASC, id ASC"
        );
        let messages = sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .fetch_all(pool)
            .await?;

        let reads: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT r.message_id, r.user_id
             FROM message_reads r
             JOIN messages m ON m.id = r.message_id
             WHERE m.conversation_id = $1",
        )
        .bind(conversation_id)
        .fetch_all(pool)
        .await?;

        let mut read_map: HashMap<DbId, Vec<DbId>> = HashMap::new();
        for (message_id, user_id) in reads {
            read_map.entry(message_id).or_default().push(user_id);
        }

        Ok(messages
            .into_iter()
            .map(|message| {
                let read_by = read_map.remove(&message.id).unwrap_or_default();
                MessageWithReads { message, read_by }
            })
            .collect())
    }

    /// Mark every message in the conversation as read by `user_id`.
    ///
    /// Insert-only with conflict skip, so the read set grows monotonically
    /// and repeated calls are harmless. Returns the number of newly marked
    /// messages.
    pub async fn mark_read(
        pool: &PgPool,
        conversation_id: DbId,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO message_reads (message_id, user_id)
             SELECT m.id, $2 FROM messages m
              WHERE m.conversation_id = $1
             ON CONFLICT ON CONSTRAINT pk_message_reads DO NOTHING",
        )
        .bind(conversation_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Unread messages in one conversation from `user_id`'s point of view:
    /// sent by the peer and not yet in the caller's read set.
    pub async fn unread_count(
        pool: &PgPool,
        conversation_id: DbId,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM messages m
              WHERE m.conversation_id = $1
                AND m.sender_id <> $2
                AND NOT EXISTS (SELECT 1 FROM message_reads r
                                 WHERE r.message_id = m.id AND r.user_id = $2)",
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
