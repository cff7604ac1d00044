//! School settings repository for database operations.
//!
//! Settings live in a single row with id = 1; saving is an upsert.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SchoolSettingsEntity;
use crate::metrics::QueryTimer;

const SETTINGS_COLUMNS: &str = "id, school_name, academic_year, max_books_per_student, \
                                homework_submission_days, ai_provider_key, updated_by, updated_at";

/// Repository for school settings database operations.
#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the settings row, if one has been saved.
    pub async fn get(&self) -> Result<Option<SchoolSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_school_settings");
        let result = sqlx::query_as::<_, SchoolSettingsEntity>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM school_settings WHERE id = 1",
        ))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Save settings, creating the row on first write.
    pub async fn upsert(
        &self,
        school_name: &str,
        academic_year: &str,
        max_books_per_student: i32,
        homework_submission_days: i32,
        ai_provider_key: Option<&str>,
        updated_by: Uuid,
    ) -> Result<SchoolSettingsEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_school_settings");
        let result = sqlx::query_as::<_, SchoolSettingsEntity>(&format!(
            r#"
            INSERT INTO school_settings (id, school_name, academic_year, max_books_per_student,
                                         homework_submission_days, ai_provider_key, updated_by)
            VALUES (1, $1, $2, $3, $4, $5, $6)
            ON CONFLICT (id)
            DO UPDATE SET school_name = EXCLUDED.school_name,
                          academic_year = EXCLUDED.academic_year,
                          max_books_per_student = EXCLUDED.max_books_per_student,
                          homework_submission_days = EXCLUDED.homework_submission_days,
                          ai_provider_key = EXCLUDED.ai_provider_key,
                          updated_by = EXCLUDED.updated_by,
                          updated_at = NOW()
            RETURNING {SETTINGS_COLUMNS}
            "#,
        ))
        .bind(school_name)
        .bind(academic_year)
        .bind(max_books_per_student)
        .bind(homework_submission_days)
        .bind(ai_provider_key)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
