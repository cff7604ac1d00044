//! Borrow request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{BorrowRequest, BorrowRequestStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for borrow request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "borrow_request_status", rename_all = "lowercase")]
pub enum BorrowRequestStatusDb {
    Pending,
    Approved,
    Rejected,
    Returned,
}

impl From<BorrowRequestStatus> for BorrowRequestStatusDb {
    fn from(status: BorrowRequestStatus) -> Self {
        match status {
            BorrowRequestStatus::Pending => BorrowRequestStatusDb::Pending,
            BorrowRequestStatus::Approved => BorrowRequestStatusDb::Approved,
            BorrowRequestStatus::Rejected => BorrowRequestStatusDb::Rejected,
            BorrowRequestStatus::Returned => BorrowRequestStatusDb::Returned,
        }
    }
}

impl From<BorrowRequestStatusDb> for BorrowRequestStatus {
    fn from(status: BorrowRequestStatusDb) -> Self {
        match status {
            BorrowRequestStatusDb::Pending => BorrowRequestStatus::Pending,
            BorrowRequestStatusDb::Approved => BorrowRequestStatus::Approved,
            BorrowRequestStatusDb::Rejected => BorrowRequestStatus::Rejected,
            BorrowRequestStatusDb::Returned => BorrowRequestStatus::Returned,
        }
    }
}

/// Database row mapping for the borrow_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct BorrowRequestEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub book_id: Uuid,
    pub status: BorrowRequestStatusDb,
    pub request_date: DateTime<Utc>,
    pub issue_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
}

impl From<BorrowRequestEntity> for BorrowRequest {
    fn from(entity: BorrowRequestEntity) -> Self {
        BorrowRequest {
            id: entity.id,
            student_id: entity.student_id,
            book_id: entity.book_id,
            status: entity.status.into(),
            request_date: entity.request_date,
            issue_date: entity.issue_date,
            return_date: entity.return_date,
            approved_by: entity.approved_by,
        }
    }
}

/// Borrow request joined with its book for listings.
#[derive(Debug, Clone, FromRow)]
pub struct BorrowRequestWithBookEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub book_id: Uuid,
    pub book_title: String,
    pub book_author: String,
    pub status: BorrowRequestStatusDb,
    pub request_date: DateTime<Utc>,
    pub issue_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
}
