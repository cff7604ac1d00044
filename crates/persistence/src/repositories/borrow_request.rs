//! Borrow request repository for database operations.
//!
//! Approval and return touch two tables (the request and the book's stock)
//! and run inside a single transaction; if either guarded update misses, the
//! transaction rolls back and the caller sees `None`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{BorrowRequestEntity, BorrowRequestStatusDb, BorrowRequestWithBookEntity};
use crate::metrics::QueryTimer;

/// Repository for borrow request-related database operations.
#[derive(Clone)]
pub struct BorrowRequestRepository {
    pool: PgPool,
}

impl BorrowRequestRepository {
    /// Creates a new BorrowRequestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new pending borrow request.
    pub async fn create(
        &self,
        student_id: Uuid,
        book_id: Uuid,
    ) -> Result<BorrowRequestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_borrow_request");
        let result = sqlx::query_as::<_, BorrowRequestEntity>(
            r#"
            INSERT INTO borrow_requests (student_id, book_id)
            VALUES ($1, $2)
            RETURNING id, student_id, book_id, status, request_date,
                      issue_date, return_date, approved_by
            "#,
        )
        .bind(student_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a borrow request by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<BorrowRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_borrow_request_by_id");
        let result = sqlx::query_as::<_, BorrowRequestEntity>(
            r#"
            SELECT id, student_id, book_id, status, request_date,
                   issue_date, return_date, approved_by
            FROM borrow_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a student's pending request for a book, if any.
    pub async fn find_pending_for_student_book(
        &self,
        student_id: Uuid,
        book_id: Uuid,
    ) -> Result<Option<BorrowRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_pending_borrow_request");
        let result = sqlx::query_as::<_, BorrowRequestEntity>(
            r#"
            SELECT id, student_id, book_id, status, request_date,
                   issue_date, return_date, approved_by
            FROM borrow_requests
            WHERE student_id = $1 AND book_id = $2 AND status = 'pending'
            "#,
        )
        .bind(student_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a student's requests, newest first.
    pub async fn list_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<BorrowRequestWithBookEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_borrow_requests_for_student");
        let result = sqlx::query_as::<_, BorrowRequestWithBookEntity>(
            r#"
            SELECT br.id, br.student_id, br.book_id,
                   b.title AS book_title, b.author AS book_author,
                   br.status, br.request_date, br.issue_date, br.return_date, br.approved_by
            FROM borrow_requests br
            JOIN books b ON br.book_id = b.id
            WHERE br.student_id = $1
            ORDER BY br.request_date DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List requests across the school, optionally filtered by status.
    pub async fn list_all(
        &self,
        status_filter: Option<BorrowRequestStatusDb>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BorrowRequestWithBookEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_borrow_requests");
        let result = if let Some(status) = status_filter {
            sqlx::query_as::<_, BorrowRequestWithBookEntity>(
                r#"
                SELECT br.id, br.student_id, br.book_id,
                       b.title AS book_title, b.author AS book_author,
                       br.status, br.request_date, br.issue_date, br.return_date, br.approved_by
                FROM borrow_requests br
                JOIN books b ON br.book_id = b.id
                WHERE br.status = $1
                ORDER BY br.request_date DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, BorrowRequestWithBookEntity>(
                r#"
                SELECT br.id, br.student_id, br.book_id,
                       b.title AS book_title, b.author AS book_author,
                       br.status, br.request_date, br.issue_date, br.return_date, br.approved_by
                FROM borrow_requests br
                JOIN books b ON br.book_id = b.id
                ORDER BY br.request_date DESC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
        };
        timer.record();
        result
    }

    /// Approve a pending request and decrement the book's stock atomically.
    ///
    /// Both updates are guarded: the stock decrement only fires while copies
    /// remain and the status flip only fires while the request is still
    /// pending. A miss on either side rolls the transaction back, so two
    /// admins racing on the last copy cannot both win.
    pub async fn approve(
        &self,
        id: Uuid,
        book_id: Uuid,
        approved_by: Uuid,
        issue_date: DateTime<Utc>,
        return_date: DateTime<Utc>,
    ) -> Result<Option<BorrowRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("approve_borrow_request");
        let mut tx = self.pool.begin().await?;

        let stock = sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies - 1
            WHERE id = $1 AND available_copies > 0
            "#,
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;
        if stock.rows_affected() == 0 {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        }

        let request = sqlx::query_as::<_, BorrowRequestEntity>(
            r#"
            UPDATE borrow_requests
            SET status = 'approved', approved_by = $2, issue_date = $3, return_date = $4
            WHERE id = $1 AND status = 'pending'
            RETURNING id, student_id, book_id, status, request_date,
                      issue_date, return_date, approved_by
            "#,
        )
        .bind(id)
        .bind(approved_by)
        .bind(issue_date)
        .bind(return_date)
        .fetch_optional(&mut *tx)
        .await?;

        let result = match request {
            Some(entity) => {
                tx.commit().await?;
                Ok(Some(entity))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        };
        timer.record();
        result
    }

    /// Reject a pending request. Stock is untouched.
    pub async fn reject(
        &self,
        id: Uuid,
        rejected_by: Uuid,
    ) -> Result<Option<BorrowRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("reject_borrow_request");
        let result = sqlx::query_as::<_, BorrowRequestEntity>(
            r#"
            UPDATE borrow_requests
            SET status = 'rejected', approved_by = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING id, student_id, book_id, status, request_date,
                      issue_date, return_date, approved_by
            "#,
        )
        .bind(id)
        .bind(rejected_by)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark an approved request returned and restore the book's stock
    /// atomically.
    pub async fn mark_returned(
        &self,
        id: Uuid,
        book_id: Uuid,
    ) -> Result<Option<BorrowRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("return_borrow_request");
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, BorrowRequestEntity>(
            r#"
            UPDATE borrow_requests
            SET status = 'returned', return_date = NOW()
            WHERE id = $1 AND status = 'approved'
            RETURNING id, student_id, book_id, status, request_date,
                      issue_date, return_date, approved_by
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let result = match request {
            Some(entity) => {
                sqlx::query(
                    r#"
                    UPDATE books
                    SET available_copies = LEAST(available_copies + 1, total_copies)
                    WHERE id = $1
                    "#,
                )
                .bind(book_id)
                .execute(&mut *tx)
                .await?;
                tx.commit().await?;
                Ok(Some(entity))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        };
        timer.record();
        result
    }

    /// Count a student's currently borrowed (approved) books.
    pub async fn count_borrowed_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_borrowed_by_student");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM borrow_requests WHERE student_id = $1 AND status = 'approved'",
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
