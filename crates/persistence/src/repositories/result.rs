//! Exam result repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ExamResultEntity;
use crate::metrics::QueryTimer;

const RESULT_COLUMNS: &str =
    "id, student_id, subject, term, marks, max_marks, grade, exam_date, created_by";

/// Repository for exam result database operations.
#[derive(Clone)]
pub struct ExamResultRepository {
    pool: PgPool,
}

impl ExamResultRepository {
    /// Creates a new ExamResultRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a result. One row per (student, subject, term); recording again
    /// overwrites marks and grade.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        &self,
        student_id: Uuid,
        subject: &str,
        term: &str,
        marks: i32,
        max_marks: i32,
        grade: &str,
        exam_date: NaiveDate,
        created_by: Uuid,
    ) -> Result<ExamResultEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_exam_result");
        let result = sqlx::query_as::<_, ExamResultEntity>(&format!(
            r#"
            INSERT INTO exam_results (student_id, subject, term, marks, max_marks, grade,
                                      exam_date, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (student_id, subject, term)
            DO UPDATE SET marks = EXCLUDED.marks,
                          max_marks = EXCLUDED.max_marks,
                          grade = EXCLUDED.grade,
                          exam_date = EXCLUDED.exam_date,
                          created_by = EXCLUDED.created_by
            RETURNING {RESULT_COLUMNS}
            "#,
        ))
        .bind(student_id)
        .bind(subject)
        .bind(term)
        .bind(marks)
        .bind(max_marks)
        .bind(grade)
        .bind(exam_date)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a student's results, newest exam first.
    pub async fn list_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<ExamResultEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_results_for_student");
        let result = sqlx::query_as::<_, ExamResultEntity>(&format!(
            r#"
            SELECT {RESULT_COLUMNS}
            FROM exam_results
            WHERE student_id = $1
            ORDER BY exam_date DESC, subject ASC
            "#,
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a result row.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_exam_result");
        let result = sqlx::query("DELETE FROM exam_results WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
