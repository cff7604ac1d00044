//! Student and class repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ClassRoomEntity, StudentEntity};
use crate::metrics::QueryTimer;

const STUDENT_COLUMNS: &str = "id, student_code, name, dob, class_id, roll_number, fathers_name, \
                               mothers_name, address, email, phone, bio, profile_photo, \
                               is_active, created_at";

/// Input for enrolling a student.
#[derive(Debug, Clone)]
pub struct StudentInput<'a> {
    pub student_code: &'a str,
    pub name: &'a str,
    pub dob: NaiveDate,
    pub class_id: Option<Uuid>,
    pub roll_number: i32,
    pub fathers_name: Option<&'a str>,
    pub mothers_name: Option<&'a str>,
    pub address: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub bio: Option<&'a str>,
}

/// Repository for student-related database operations.
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Creates a new StudentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enroll a student.
    pub async fn create(&self, input: &StudentInput<'_>) -> Result<StudentEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_student");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            r#"
            INSERT INTO students (student_code, name, dob, class_id, roll_number, fathers_name,
                                  mothers_name, address, email, phone, bio)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {STUDENT_COLUMNS}
            "#,
        ))
        .bind(input.student_code)
        .bind(input.name)
        .bind(input.dob)
        .bind(input.class_id)
        .bind(input.roll_number)
        .bind(input.fathers_name)
        .bind(input.mothers_name)
        .bind(input.address)
        .bind(input.email)
        .bind(input.phone)
        .bind(input.bio)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a student by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_student_by_id");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a student by registration code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_student_by_code");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE student_code = $1",
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List active students, optionally scoped to one class. Ordered by roll
    /// number for registers.
    pub async fn list_active(
        &self,
        class_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_students");
        let result = if let Some(class_id) = class_id {
            sqlx::query_as::<_, StudentEntity>(&format!(
                r#"
                SELECT {STUDENT_COLUMNS}
                FROM students
                WHERE is_active = TRUE AND class_id = $1
                ORDER BY roll_number ASC
                LIMIT $2 OFFSET $3
                "#,
            ))
            .bind(class_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, StudentEntity>(&format!(
                r#"
                SELECT {STUDENT_COLUMNS}
                FROM students
                WHERE is_active = TRUE
                ORDER BY name ASC
                LIMIT $1 OFFSET $2
                "#,
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
        };
        timer.record();
        result
    }

    /// Count active students, optionally scoped to one class.
    pub async fn count_active(&self, class_id: Option<Uuid>) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_active_students");
        let result = if let Some(class_id) = class_id {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM students WHERE is_active = TRUE AND class_id = $1",
            )
            .bind(class_id)
            .fetch_one(&self.pool)
            .await
        } else {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE is_active = TRUE")
                .fetch_one(&self.pool)
                .await
        };
        timer.record();
        result
    }

    /// Student self-service profile edit. Only bio, email and phone are
    /// writable through this path.
    pub async fn update_profile(
        &self,
        id: Uuid,
        bio: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_student_profile");
        let result = sqlx::query_as::<_, StudentEntity>(&format!(
            r#"
            UPDATE students
            SET bio = COALESCE($2, bio),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone)
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(bio)
        .bind(email)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove a student from the roster (soft delete).
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_student");
        let result = sqlx::query("UPDATE students SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// List all classes, ordered by class number then section.
    pub async fn list_classes(&self) -> Result<Vec<ClassRoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_classes");
        let result = sqlx::query_as::<_, ClassRoomEntity>(
            "SELECT id, class_number, section FROM classes ORDER BY class_number, section",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a class by ID.
    pub async fn find_class_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ClassRoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_class_by_id");
        let result = sqlx::query_as::<_, ClassRoomEntity>(
            "SELECT id, class_number, section FROM classes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
