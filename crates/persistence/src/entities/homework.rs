//! Homework and submission entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{Homework, Submission};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the homework table.
#[derive(Debug, Clone, FromRow)]
pub struct HomeworkEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub subject: String,
    pub class_id: Option<Uuid>,
    pub deadline: DateTime<Utc>,
    pub attachment_url: Option<String>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<HomeworkEntity> for Homework {
    fn from(entity: HomeworkEntity) -> Self {
        Homework {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            subject: entity.subject,
            class_id: entity.class_id,
            deadline: entity.deadline,
            attachment_url: entity.attachment_url,
            is_active: entity.is_active,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the submissions table.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionEntity {
    pub id: Uuid,
    pub homework_id: Uuid,
    pub student_id: Uuid,
    pub content: Option<String>,
    pub attachment_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub grade: i32,
    pub feedback: Option<String>,
    pub graded_by: Option<Uuid>,
    pub graded_at: Option<DateTime<Utc>>,
}

impl From<SubmissionEntity> for Submission {
    fn from(entity: SubmissionEntity) -> Self {
        Submission {
            id: entity.id,
            homework_id: entity.homework_id,
            student_id: entity.student_id,
            content: entity.content,
            attachment_url: entity.attachment_url,
            submitted_at: entity.submitted_at,
            grade: entity.grade,
            feedback: entity.feedback,
            graded_by: entity.graded_by,
            graded_at: entity.graded_at,
        }
    }
}
