//! Attendance entity (database row mapping).

use chrono::NaiveDate;
use domain::models::AttendanceRecord;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the attendance table.
/// Unique on (student_id, date, subject).
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub subject: String,
    pub is_present: bool,
    pub marked_by: Uuid,
}

impl From<AttendanceEntity> for AttendanceRecord {
    fn from(entity: AttendanceEntity) -> Self {
        AttendanceRecord {
            id: entity.id,
            student_id: entity.student_id,
            date: entity.date,
            subject: entity.subject,
            is_present: entity.is_present,
            marked_by: entity.marked_by,
        }
    }
}
