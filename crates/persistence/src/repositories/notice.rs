//! Notice repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{NoticeEntity, NoticePriorityDb};
use crate::metrics::QueryTimer;

const NOTICE_COLUMNS: &str = "id, title, content, priority, target_class, file_url, \
                              publish_date, expiry_date, is_active, created_by";

/// Repository for notice-related database operations.
#[derive(Clone)]
pub struct NoticeRepository {
    pool: PgPool,
}

impl NoticeRepository {
    /// Creates a new NoticeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Publish a notice.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        priority: NoticePriorityDb,
        target_class: Option<Uuid>,
        file_url: Option<&str>,
        expiry_date: Option<DateTime<Utc>>,
        created_by: Uuid,
    ) -> Result<NoticeEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_notice");
        let result = sqlx::query_as::<_, NoticeEntity>(&format!(
            r#"
            INSERT INTO notices (title, content, priority, target_class, file_url,
                                 expiry_date, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {NOTICE_COLUMNS}
            "#,
        ))
        .bind(title)
        .bind(content)
        .bind(priority)
        .bind(target_class)
        .bind(file_url)
        .bind(expiry_date)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a notice by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<NoticeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_notice_by_id");
        let result = sqlx::query_as::<_, NoticeEntity>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List live notices visible to a class: active, not expired, and either
    /// school-wide or targeted at the class. High priority floats up.
    pub async fn list_visible(
        &self,
        class_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Vec<NoticeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_visible_notices");
        let result = sqlx::query_as::<_, NoticeEntity>(&format!(
            r#"
            SELECT {NOTICE_COLUMNS}
            FROM notices
            WHERE is_active = TRUE
              AND (expiry_date IS NULL OR expiry_date >= $2)
              AND (target_class IS NULL OR target_class = $1)
            ORDER BY priority DESC, publish_date DESC
            "#,
        ))
        .bind(class_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Take a notice down (soft delete).
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_notice");
        let result = sqlx::query("UPDATE notices SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
