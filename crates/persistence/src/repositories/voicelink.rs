//! Counselling request repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{VoiceLinkRequestEntity, VoiceLinkStatusDb};
use crate::metrics::QueryTimer;

const VOICELINK_COLUMNS: &str = "id, student_id, request_type, reason, status, counsellor_id, \
                                 scheduled_time, meeting_link, notes, created_at, updated_at";

/// Repository for counselling request database operations.
#[derive(Clone)]
pub struct VoiceLinkRepository {
    pool: PgPool,
}

impl VoiceLinkRepository {
    /// Creates a new VoiceLinkRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a counselling request.
    pub async fn create(
        &self,
        student_id: Uuid,
        request_type: &str,
        reason: Option<&str>,
    ) -> Result<VoiceLinkRequestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_voicelink_request");
        let result = sqlx::query_as::<_, VoiceLinkRequestEntity>(&format!(
            r#"
            INSERT INTO voicelink_requests (student_id, request_type, reason)
            VALUES ($1, $2, $3)
            RETURNING {VOICELINK_COLUMNS}
            "#,
        ))
        .bind(student_id)
        .bind(request_type)
        .bind(reason)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a counselling request by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<VoiceLinkRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_voicelink_request_by_id");
        let result = sqlx::query_as::<_, VoiceLinkRequestEntity>(&format!(
            "SELECT {VOICELINK_COLUMNS} FROM voicelink_requests WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a student's counselling requests, newest first.
    pub async fn list_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<VoiceLinkRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_voicelink_requests_for_student");
        let result = sqlx::query_as::<_, VoiceLinkRequestEntity>(&format!(
            r#"
            SELECT {VOICELINK_COLUMNS}
            FROM voicelink_requests
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

    /// List counselling requests, optionally filtered by status.
    pub async fn list_all(
        &self,
        status_filter: Option<VoiceLinkStatusDb>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VoiceLinkRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_voicelink_requests");
        let result = if let Some(status) = status_filter {
            sqlx::query_as::<_, VoiceLinkRequestEntity>(&format!(
                r#"
                SELECT {VOICELINK_COLUMNS}
                FROM voicelink_requests
                WHERE status = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            ))
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, VoiceLinkRequestEntity>(&format!(
                r#"
                SELECT {VOICELINK_COLUMNS}
                FROM voicelink_requests
                ORDER BY created_at DESC
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

    /// Move a request to a new status, guarded on the status it was read at.
    /// Scheduling details are only written when supplied.
    #[allow(clippy::too_many_arguments)]
    pub async fn transition(
        &self,
        id: Uuid,
        expected_status: VoiceLinkStatusDb,
        new_status: VoiceLinkStatusDb,
        counsellor_id: Uuid,
        scheduled_time: Option<DateTime<Utc>>,
        meeting_link: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<VoiceLinkRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("transition_voicelink_request");
        let result = sqlx::query_as::<_, VoiceLinkRequestEntity>(&format!(
            r#"
            UPDATE voicelink_requests
            SET status = $3,
                counsellor_id = $4,
                scheduled_time = COALESCE($5, scheduled_time),
                meeting_link = COALESCE($6, meeting_link),
                notes = COALESCE($7, notes),
                updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {VOICELINK_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(expected_status)
        .bind(new_status)
        .bind(counsellor_id)
        .bind(scheduled_time)
        .bind(meeting_link)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
