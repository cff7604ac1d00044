//! AI query repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AiQueryEntity;
use crate::metrics::QueryTimer;

const AI_QUERY_COLUMNS: &str = "id, student_id, query, ai_response, is_forwarded_to_teacher, \
                                teacher_id, teacher_response, resolved_at, created_at";

/// Repository for AI query database operations.
#[derive(Clone)]
pub struct AiQueryRepository {
    pool: PgPool,
}

impl AiQueryRepository {
    /// Creates a new AiQueryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a student's doubt together with the AI's answer, if any.
    pub async fn create(
        &self,
        student_id: Uuid,
        query: &str,
        ai_response: Option<&str>,
    ) -> Result<AiQueryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_ai_query");
        let result = sqlx::query_as::<_, AiQueryEntity>(&format!(
            r#"
            INSERT INTO ai_queries (student_id, query, ai_response)
            VALUES ($1, $2, $3)
            RETURNING {AI_QUERY_COLUMNS}
            "#,
        ))
        .bind(student_id)
        .bind(query)
        .bind(ai_response)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a query by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AiQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_ai_query_by_id");
        let result = sqlx::query_as::<_, AiQueryEntity>(&format!(
            "SELECT {AI_QUERY_COLUMNS} FROM ai_queries WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a student's queries, newest first.
    pub async fn list_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<AiQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_ai_queries_for_student");
        let result = sqlx::query_as::<_, AiQueryEntity>(&format!(
            r#"
            SELECT {AI_QUERY_COLUMNS}
            FROM ai_queries
            WHERE student_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List queries forwarded to teachers, unresolved first.
    pub async fn list_forwarded(&self) -> Result<Vec<AiQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_forwarded_ai_queries");
        let result = sqlx::query_as::<_, AiQueryEntity>(&format!(
            r#"
            SELECT {AI_QUERY_COLUMNS}
            FROM ai_queries
            WHERE is_forwarded_to_teacher = TRUE
            ORDER BY resolved_at ASC NULLS FIRST, created_at DESC
            "#,
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Forward a query to teachers. Only the owning student may forward.
    pub async fn forward(
        &self,
        id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<AiQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("forward_ai_query");
        let result = sqlx::query_as::<_, AiQueryEntity>(&format!(
            r#"
            UPDATE ai_queries
            SET is_forwarded_to_teacher = TRUE
            WHERE id = $1 AND student_id = $2
            RETURNING {AI_QUERY_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Write a teacher's response onto a forwarded query.
    pub async fn respond(
        &self,
        id: Uuid,
        teacher_id: Uuid,
        teacher_response: &str,
        resolved_at: DateTime<Utc>,
    ) -> Result<Option<AiQueryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("respond_to_ai_query");
        let result = sqlx::query_as::<_, AiQueryEntity>(&format!(
            r#"
            UPDATE ai_queries
            SET teacher_id = $2, teacher_response = $3, resolved_at = $4
            WHERE id = $1 AND is_forwarded_to_teacher = TRUE
            RETURNING {AI_QUERY_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(teacher_id)
        .bind(teacher_response)
        .bind(resolved_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
