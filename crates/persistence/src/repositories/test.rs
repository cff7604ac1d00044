//! Online test and attempt repository for database operations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use domain::models::TestQuestion;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{TestAttemptEntity, TestEntity};
use crate::metrics::QueryTimer;

const TEST_COLUMNS: &str = "id, title, subject, class_id, questions, duration_minutes, \
                            start_time, end_time, is_active, created_by, created_at";
const ATTEMPT_COLUMNS: &str =
    "id, test_id, student_id, answers, score, max_score, time_taken_seconds, attempted_at";

/// Repository for test-related database operations.
#[derive(Clone)]
pub struct TestRepository {
    pool: PgPool,
}

impl TestRepository {
    /// Creates a new TestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a test with its question bank.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        title: &str,
        subject: &str,
        class_id: Option<Uuid>,
        questions: &[TestQuestion],
        duration_minutes: i32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        created_by: Uuid,
    ) -> Result<TestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_test");
        let result = sqlx::query_as::<_, TestEntity>(&format!(
            r#"
            INSERT INTO tests (title, subject, class_id, questions, duration_minutes,
                               start_time, end_time, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TEST_COLUMNS}
            "#,
        ))
        .bind(title)
        .bind(subject)
        .bind(class_id)
        .bind(Json(questions))
        .bind(duration_minutes)
        .bind(start_time)
        .bind(end_time)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a test by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_test_by_id");
        let result = sqlx::query_as::<_, TestEntity>(&format!(
            "SELECT {TEST_COLUMNS} FROM tests WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List active tests visible to a class (or school-wide rows), soonest
    /// start first.
    pub async fn list_active_for_class(
        &self,
        class_id: Option<Uuid>,
    ) -> Result<Vec<TestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_tests_for_class");
        let result = sqlx::query_as::<_, TestEntity>(&format!(
            r#"
            SELECT {TEST_COLUMNS}
            FROM tests
            WHERE is_active = TRUE AND (class_id = $1 OR class_id IS NULL)
            ORDER BY start_time ASC
            "#,
        ))
        .bind(class_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Retire a test (soft delete).
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_test");
        let result = sqlx::query("UPDATE tests SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// Whether the student has already attempted the test.
    pub async fn attempt_exists(
        &self,
        test_id: Uuid,
        student_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("test_attempt_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM test_attempts WHERE test_id = $1 AND student_id = $2)",
        )
        .bind(test_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Persist a finished attempt. The unique index on (test_id, student_id)
    /// rejects a second attempt at the store level.
    pub async fn insert_attempt(
        &self,
        test_id: Uuid,
        student_id: Uuid,
        answers: &BTreeMap<usize, String>,
        score: i32,
        max_score: i32,
        time_taken_seconds: i32,
    ) -> Result<TestAttemptEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_test_attempt");
        let result = sqlx::query_as::<_, TestAttemptEntity>(&format!(
            r#"
            INSERT INTO test_attempts (test_id, student_id, answers, score, max_score,
                                       time_taken_seconds)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ATTEMPT_COLUMNS}
            "#,
        ))
        .bind(test_id)
        .bind(student_id)
        .bind(Json(answers))
        .bind(score)
        .bind(max_score)
        .bind(time_taken_seconds)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a student's attempts, newest first.
    pub async fn list_attempts_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<TestAttemptEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_attempts_for_student");
        let result = sqlx::query_as::<_, TestAttemptEntity>(&format!(
            r#"
            SELECT {ATTEMPT_COLUMNS}
            FROM test_attempts
            WHERE student_id = $1
            ORDER BY attempted_at DESC
            "#,
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all attempts for a test, highest score first.
    pub async fn list_attempts_for_test(
        &self,
        test_id: Uuid,
    ) -> Result<Vec<TestAttemptEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_attempts_for_test");
        let result = sqlx::query_as::<_, TestAttemptEntity>(&format!(
            r#"
            SELECT {ATTEMPT_COLUMNS}
            FROM test_attempts
            WHERE test_id = $1
            ORDER BY score DESC, time_taken_seconds ASC
            "#,
        ))
        .bind(test_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
