//! Exam result entity (database row mapping).

use chrono::NaiveDate;
use domain::models::ExamResult;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the exam_results table.
#[derive(Debug, Clone, FromRow)]
pub struct ExamResultEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    pub term: String,
    pub marks: i32,
    pub max_marks: i32,
    pub grade: String,
    pub exam_date: NaiveDate,
    pub created_by: Uuid,
}

impl From<ExamResultEntity> for ExamResult {
    fn from(entity: ExamResultEntity) -> Self {
        ExamResult {
            id: entity.id,
            student_id: entity.student_id,
            subject: entity.subject,
            term: entity.term,
            marks: entity.marks,
            max_marks: entity.max_marks,
            grade: entity.grade,
            exam_date: entity.exam_date,
            created_by: entity.created_by,
        }
    }
}
