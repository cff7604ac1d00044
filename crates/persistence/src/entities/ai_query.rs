//! AI query entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::AiQuery;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the ai_queries table.
#[derive(Debug, Clone, FromRow)]
pub struct AiQueryEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub query: String,
    pub ai_response: Option<String>,
    pub is_forwarded_to_teacher: bool,
    pub teacher_id: Option<Uuid>,
    pub teacher_response: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<AiQueryEntity> for AiQuery {
    fn from(entity: AiQueryEntity) -> Self {
        AiQuery {
            id: entity.id,
            student_id: entity.student_id,
            query: entity.query,
            ai_response: entity.ai_response,
            is_forwarded_to_teacher: entity.is_forwarded_to_teacher,
            teacher_id: entity.teacher_id,
            teacher_response: entity.teacher_response,
            resolved_at: entity.resolved_at,
            created_at: entity.created_at,
        }
    }
}
