//! Attendance repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AttendanceEntity;
use crate::metrics::QueryTimer;

const ATTENDANCE_COLUMNS: &str = "id, student_id, date, subject, is_present, marked_by";

/// Repository for attendance database operations.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Creates a new AttendanceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mark one student. Marking the same (student, date, subject) again
    /// overwrites the earlier row.
    pub async fn mark(
        &self,
        student_id: Uuid,
        date: NaiveDate,
        subject: &str,
        is_present: bool,
        marked_by: Uuid,
    ) -> Result<AttendanceEntity, sqlx::Error> {
        let timer = QueryTimer::new("mark_attendance");
        let result = sqlx::query_as::<_, AttendanceEntity>(&format!(
            r#"
            INSERT INTO attendance (student_id, date, subject, is_present, marked_by)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (student_id, date, subject)
            DO UPDATE SET is_present = EXCLUDED.is_present,
                          marked_by = EXCLUDED.marked_by
            RETURNING {ATTENDANCE_COLUMNS}
            "#,
        ))
        .bind(student_id)
        .bind(date)
        .bind(subject)
        .bind(is_present)
        .bind(marked_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark every active student of a class for a date/subject, overwriting
    /// any rows already there.
    pub async fn mark_class(
        &self,
        class_id: Uuid,
        date: NaiveDate,
        subject: &str,
        is_present: bool,
        marked_by: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("mark_class_attendance");
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (student_id, date, subject, is_present, marked_by)
            SELECT s.id, $2, $3, $4, $5
            FROM students s
            WHERE s.class_id = $1 AND s.is_active = TRUE
            ON CONFLICT (student_id, date, subject)
            DO UPDATE SET is_present = EXCLUDED.is_present,
                          marked_by = EXCLUDED.marked_by
            "#,
        )
        .bind(class_id)
        .bind(date)
        .bind(subject)
        .bind(is_present)
        .bind(marked_by)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() as i64);
        timer.record();
        result
    }

    /// List a student's attendance over a date range.
    pub async fn list_for_student(
        &self,
        student_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_attendance_for_student");
        let result = sqlx::query_as::<_, AttendanceEntity>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS}
            FROM attendance
            WHERE student_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date DESC, subject ASC
            "#,
        ))
        .bind(student_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// A class register for one date.
    pub async fn list_for_class_on(
        &self,
        class_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_attendance_for_class");
        let result = sqlx::query_as::<_, AttendanceEntity>(
            r#"
            SELECT a.id, a.student_id, a.date, a.subject, a.is_present, a.marked_by
            FROM attendance a
            JOIN students s ON a.student_id = s.id
            WHERE s.class_id = $1 AND a.date = $2
            ORDER BY s.roll_number ASC
            "#,
        )
        .bind(class_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
