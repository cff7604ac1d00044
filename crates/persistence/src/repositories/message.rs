//! Message repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{MessageEntity, MessageKindDb, SenderKindDb};
use crate::metrics::QueryTimer;

const MESSAGE_COLUMNS: &str =
    "id, sender_id, sender_type, class_id, message_type, content, sent_at";

/// Repository for message-related database operations.
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Creates a new MessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Post a message to a class feed.
    pub async fn create(
        &self,
        sender_id: Uuid,
        sender_type: SenderKindDb,
        class_id: Uuid,
        message_type: MessageKindDb,
        content: &str,
    ) -> Result<MessageEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_message");
        let result = sqlx::query_as::<_, MessageEntity>(&format!(
            r#"
            INSERT INTO messages (sender_id, sender_type, class_id, message_type, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MESSAGE_COLUMNS}
            "#,
        ))
        .bind(sender_id)
        .bind(sender_type)
        .bind(class_id)
        .bind(message_type)
        .bind(content)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Broadcast a message to every class in one round trip.
    pub async fn create_broadcast(
        &self,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Vec<MessageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_broadcast");
        let result = sqlx::query_as::<_, MessageEntity>(&format!(
            r#"
            INSERT INTO messages (sender_id, sender_type, class_id, message_type, content)
            SELECT $1, 'admin', c.id, 'broadcast', $2
            FROM classes c
            RETURNING {MESSAGE_COLUMNS}
            "#,
        ))
        .bind(sender_id)
        .bind(content)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The most recent `limit` messages of a class feed, oldest first so the
    /// feed reads top to bottom.
    pub async fn recent_for_class(
        &self,
        class_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MessageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("recent_messages_for_class");
        let result = sqlx::query_as::<_, MessageEntity>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM (
                SELECT {MESSAGE_COLUMNS}
                FROM messages
                WHERE class_id = $1
                ORDER BY sent_at DESC
                LIMIT $2
            ) recent
            ORDER BY sent_at ASC
            "#,
        ))
        .bind(class_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
