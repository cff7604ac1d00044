//! Borrow request domain models for the library workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a borrow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorrowRequestStatus {
    Pending,
    Approved,
    Rejected,
    Returned,
}

impl std::fmt::Display for BorrowRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BorrowRequestStatus::Pending => write!(f, "pending"),
            BorrowRequestStatus::Approved => write!(f, "approved"),
            BorrowRequestStatus::Rejected => write!(f, "rejected"),
            BorrowRequestStatus::Returned => write!(f, "returned"),
        }
    }
}

/// A student's request to borrow a book.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BorrowRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub book_id: Uuid,
    pub status: BorrowRequestStatus,
    pub request_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Uuid>,
}

/// Request body for creating a borrow request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateBorrowRequest {
    pub book_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BorrowRequestStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(BorrowRequestStatus::Returned.to_string(), "returned");
    }
}
