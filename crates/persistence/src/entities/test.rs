//! Online test and attempt entities (database row mappings).
//!
//! Questions and answers are stored as JSONB columns.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use domain::models::{Test, TestAttempt, TestQuestion};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the tests table.
#[derive(Debug, Clone, FromRow)]
pub struct TestEntity {
    pub id: Uuid,
    pub title: String,
    pub subject: String,
    pub class_id: Option<Uuid>,
    pub questions: Json<Vec<TestQuestion>>,
    pub duration_minutes: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<TestEntity> for Test {
    fn from(entity: TestEntity) -> Self {
        Test {
            id: entity.id,
            title: entity.title,
            subject: entity.subject,
            class_id: entity.class_id,
            questions: entity.questions.0,
            duration_minutes: entity.duration_minutes,
            start_time: entity.start_time,
            end_time: entity.end_time,
            is_active: entity.is_active,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the test_attempts table.
#[derive(Debug, Clone, FromRow)]
pub struct TestAttemptEntity {
    pub id: Uuid,
    pub test_id: Uuid,
    pub student_id: Uuid,
    pub answers: Json<BTreeMap<usize, String>>,
    pub score: i32,
    pub max_score: i32,
    pub time_taken_seconds: i32,
    pub attempted_at: DateTime<Utc>,
}

impl From<TestAttemptEntity> for TestAttempt {
    fn from(entity: TestAttemptEntity) -> Self {
        TestAttempt {
            id: entity.id,
            test_id: entity.test_id,
            student_id: entity.student_id,
            answers: entity.answers.0,
            score: entity.score,
            max_score: entity.max_score,
            time_taken_seconds: entity.time_taken_seconds,
            attempted_at: entity.attempted_at,
        }
    }
}
