//! Attendance domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One attendance mark. One row per (student, date, subject).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub subject: String,
    pub is_present: bool,
    pub marked_by: Uuid,
}

/// Request to mark one student; marking again overwrites the existing row.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct MarkAttendanceRequest {
    pub student_id: Uuid,
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "Subject is required"))]
    pub subject: String,
    pub is_present: bool,
}

/// Request to mark every student of a class present or absent for a
/// date/subject, replacing any existing rows.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct BulkMarkRequest {
    pub class_id: Uuid,
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "Subject is required"))]
    pub subject: String,
    pub is_present: bool,
}
