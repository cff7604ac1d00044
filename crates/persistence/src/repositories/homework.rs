//! Homework and submission repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{HomeworkEntity, SubmissionEntity};
use crate::metrics::QueryTimer;

const HOMEWORK_COLUMNS: &str = "id, title, description, subject, class_id, deadline, \
                                attachment_url, is_active, created_by, created_at";
const SUBMISSION_COLUMNS: &str = "id, homework_id, student_id, content, attachment_url, \
                                  submitted_at, grade, feedback, graded_by, graded_at";

/// Repository for homework-related database operations.
#[derive(Clone)]
pub struct HomeworkRepository {
    pool: PgPool,
}

impl HomeworkRepository {
    /// Creates a new HomeworkRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a homework assignment.
    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        subject: &str,
        class_id: Option<Uuid>,
        deadline: DateTime<Utc>,
        attachment_url: Option<&str>,
        created_by: Uuid,
    ) -> Result<HomeworkEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_homework");
        let result = sqlx::query_as::<_, HomeworkEntity>(&format!(
            r#"
            INSERT INTO homework (title, description, subject, class_id, deadline,
                                  attachment_url, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {HOMEWORK_COLUMNS}
            "#,
        ))
        .bind(title)
        .bind(description)
        .bind(subject)
        .bind(class_id)
        .bind(deadline)
        .bind(attachment_url)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a homework assignment by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<HomeworkEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_homework_by_id");
        let result = sqlx::query_as::<_, HomeworkEntity>(&format!(
            "SELECT {HOMEWORK_COLUMNS} FROM homework WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List active homework for a class (or school-wide rows), newest
    /// deadline first.
    pub async fn list_active_for_class(
        &self,
        class_id: Option<Uuid>,
    ) -> Result<Vec<HomeworkEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_homework_for_class");
        let result = sqlx::query_as::<_, HomeworkEntity>(&format!(
            r#"
            SELECT {HOMEWORK_COLUMNS}
            FROM homework
            WHERE is_active = TRUE AND (class_id = $1 OR class_id IS NULL)
            ORDER BY deadline DESC
            "#,
        ))
        .bind(class_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Retire a homework assignment (soft delete).
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_homework");
        let result = sqlx::query("UPDATE homework SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// Record a student's submission. One per (homework, student); submitting
    /// again replaces the content and resets the submission time.
    pub async fn submit(
        &self,
        homework_id: Uuid,
        student_id: Uuid,
        content: Option<&str>,
        attachment_url: Option<&str>,
    ) -> Result<SubmissionEntity, sqlx::Error> {
        let timer = QueryTimer::new("submit_homework");
        let result = sqlx::query_as::<_, SubmissionEntity>(&format!(
            r#"
            INSERT INTO submissions (homework_id, student_id, content, attachment_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (homework_id, student_id)
            DO UPDATE SET content = EXCLUDED.content,
                          attachment_url = EXCLUDED.attachment_url,
                          submitted_at = NOW()
            RETURNING {SUBMISSION_COLUMNS}
            "#,
        ))
        .bind(homework_id)
        .bind(student_id)
        .bind(content)
        .bind(attachment_url)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a submission by ID.
    pub async fn find_submission_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_submission_by_id");
        let result = sqlx::query_as::<_, SubmissionEntity>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List submissions for a homework assignment.
    pub async fn list_submissions_for_homework(
        &self,
        homework_id: Uuid,
    ) -> Result<Vec<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_submissions_for_homework");
        let result = sqlx::query_as::<_, SubmissionEntity>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM submissions
            WHERE homework_id = $1
            ORDER BY submitted_at ASC
            "#,
        ))
        .bind(homework_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a student's submissions, newest first.
    pub async fn list_submissions_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_submissions_for_student");
        let result = sqlx::query_as::<_, SubmissionEntity>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM submissions
            WHERE student_id = $1
            ORDER BY submitted_at DESC
            "#,
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Write a grade onto a submission. Grading again overwrites.
    pub async fn grade(
        &self,
        id: Uuid,
        grade: i32,
        feedback: Option<&str>,
        graded_by: Uuid,
        graded_at: DateTime<Utc>,
    ) -> Result<Option<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("grade_submission");
        let result = sqlx::query_as::<_, SubmissionEntity>(&format!(
            r#"
            UPDATE submissions
            SET grade = $2, feedback = $3, graded_by = $4, graded_at = $5
            WHERE id = $1
            RETURNING {SUBMISSION_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(grade)
        .bind(feedback)
        .bind(graded_by)
        .bind(graded_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
