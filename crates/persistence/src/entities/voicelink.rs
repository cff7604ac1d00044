//! Counselling request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{VoiceLinkRequest, VoiceLinkStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for counselling request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "voicelink_status", rename_all = "lowercase")]
pub enum VoiceLinkStatusDb {
    Pending,
    Approved,
    Completed,
    Rejected,
}

impl From<VoiceLinkStatus> for VoiceLinkStatusDb {
    fn from(status: VoiceLinkStatus) -> Self {
        match status {
            VoiceLinkStatus::Pending => VoiceLinkStatusDb::Pending,
            VoiceLinkStatus::Approved => VoiceLinkStatusDb::Approved,
            VoiceLinkStatus::Completed => VoiceLinkStatusDb::Completed,
            VoiceLinkStatus::Rejected => VoiceLinkStatusDb::Rejected,
        }
    }
}

impl From<VoiceLinkStatusDb> for VoiceLinkStatus {
    fn from(status: VoiceLinkStatusDb) -> Self {
        match status {
            VoiceLinkStatusDb::Pending => VoiceLinkStatus::Pending,
            VoiceLinkStatusDb::Approved => VoiceLinkStatus::Approved,
            VoiceLinkStatusDb::Completed => VoiceLinkStatus::Completed,
            VoiceLinkStatusDb::Rejected => VoiceLinkStatus::Rejected,
        }
    }
}

/// Database row mapping for the voicelink_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct VoiceLinkRequestEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub request_type: String,
    pub reason: Option<String>,
    pub status: VoiceLinkStatusDb,
    pub counsellor_id: Option<Uuid>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VoiceLinkRequestEntity> for VoiceLinkRequest {
    fn from(entity: VoiceLinkRequestEntity) -> Self {
        VoiceLinkRequest {
            id: entity.id,
            student_id: entity.student_id,
            request_type: entity.request_type,
            reason: entity.reason,
            status: entity.status.into(),
            counsellor_id: entity.counsellor_id,
            scheduled_time: entity.scheduled_time,
            meeting_link: entity.meeting_link,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
