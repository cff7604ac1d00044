//! Notice entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Notice, NoticePriority};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for notice priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "notice_priority", rename_all = "lowercase")]
pub enum NoticePriorityDb {
    Low,
    Medium,
    High,
}

impl From<NoticePriority> for NoticePriorityDb {
    fn from(priority: NoticePriority) -> Self {
        match priority {
            NoticePriority::Low => NoticePriorityDb::Low,
            NoticePriority::Medium => NoticePriorityDb::Medium,
            NoticePriority::High => NoticePriorityDb::High,
        }
    }
}

impl From<NoticePriorityDb> for NoticePriority {
    fn from(priority: NoticePriorityDb) -> Self {
        match priority {
            NoticePriorityDb::Low => NoticePriority::Low,
            NoticePriorityDb::Medium => NoticePriority::Medium,
            NoticePriorityDb::High => NoticePriority::High,
        }
    }
}

/// Database row mapping for the notices table.
#[derive(Debug, Clone, FromRow)]
pub struct NoticeEntity {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub priority: NoticePriorityDb,
    pub target_class: Option<Uuid>,
    pub file_url: Option<String>,
    pub publish_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_by: Uuid,
}

impl From<NoticeEntity> for Notice {
    fn from(entity: NoticeEntity) -> Self {
        Notice {
            id: entity.id,
            title: entity.title,
            content: entity.content,
            priority: entity.priority.into(),
            target_class: entity.target_class,
            file_url: entity.file_url,
            publish_date: entity.publish_date,
            expiry_date: entity.expiry_date,
            is_active: entity.is_active,
            created_by: entity.created_by,
        }
    }
}
