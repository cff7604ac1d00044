//! School settings entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::SchoolSettings;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the school_settings table (single row, id = 1).
#[derive(Debug, Clone, FromRow)]
pub struct SchoolSettingsEntity {
    pub id: i32,
    pub school_name: String,
    pub academic_year: String,
    pub max_books_per_student: i32,
    pub homework_submission_days: i32,
    pub ai_provider_key: Option<String>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl From<SchoolSettingsEntity> for SchoolSettings {
    fn from(entity: SchoolSettingsEntity) -> Self {
        SchoolSettings {
            school_name: entity.school_name,
            academic_year: entity.academic_year,
            max_books_per_student: entity.max_books_per_student,
            homework_submission_days: entity.homework_submission_days,
            ai_provider_key: entity.ai_provider_key,
            updated_by: entity.updated_by,
            updated_at: entity.updated_at,
        }
    }
}
