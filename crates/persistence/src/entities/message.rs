//! Message entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Message, MessageKind, SenderKind};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for message sender type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "sender_kind", rename_all = "lowercase")]
pub enum SenderKindDb {
    Student,
    Admin,
}

impl From<SenderKind> for SenderKindDb {
    fn from(kind: SenderKind) -> Self {
        match kind {
            SenderKind::Student => SenderKindDb::Student,
            SenderKind::Admin => SenderKindDb::Admin,
        }
    }
}

impl From<SenderKindDb> for SenderKind {
    fn from(kind: SenderKindDb) -> Self {
        match kind {
            SenderKindDb::Student => SenderKind::Student,
            SenderKindDb::Admin => SenderKind::Admin,
        }
    }
}

/// Database enum for message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "message_kind", rename_all = "lowercase")]
pub enum MessageKindDb {
    Group,
    Broadcast,
}

impl From<MessageKind> for MessageKindDb {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Group => MessageKindDb::Group,
            MessageKind::Broadcast => MessageKindDb::Broadcast,
        }
    }
}

impl From<MessageKindDb> for MessageKind {
    fn from(kind: MessageKindDb) -> Self {
        match kind {
            MessageKindDb::Group => MessageKind::Group,
            MessageKindDb::Broadcast => MessageKind::Broadcast,
        }
    }
}

/// Database row mapping for the messages table.
#[derive(Debug, Clone, FromRow)]
pub struct MessageEntity {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_type: SenderKindDb,
    pub class_id: Uuid,
    pub message_type: MessageKindDb,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl From<MessageEntity> for Message {
    fn from(entity: MessageEntity) -> Self {
        Message {
            id: entity.id,
            sender_id: entity.sender_id,
            sender_type: entity.sender_type.into(),
            class_id: entity.class_id,
            message_type: entity.message_type.into(),
            content: entity.content,
            sent_at: entity.sent_at,
        }
    }
}
