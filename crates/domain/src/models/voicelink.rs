//! Counselling (voice link) request domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Status of a counselling request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceLinkStatus {
    Pending,
    Approved,
    Completed,
    Rejected,
}

impl std::fmt::Display for VoiceLinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceLinkStatus::Pending => write!(f, "pending"),
            VoiceLinkStatus::Approved => write!(f, "approved"),
            VoiceLinkStatus::Completed => write!(f, "completed"),
            VoiceLinkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A student's request for a counselling session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VoiceLinkRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub request_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub status: VoiceLinkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counsellor_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student request to open a counselling request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateVoiceLinkRequest {
    #[validate(length(min = 1, max = 60, message = "Request type is required"))]
    pub request_type: String,
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
}

/// Optional scheduling details attached on approval.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleDetails {
    pub scheduled_time: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

impl ScheduleDetails {
    pub fn is_empty(&self) -> bool {
        self.scheduled_time.is_none() && self.meeting_link.is_none() && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(VoiceLinkStatus::Pending.to_string(), "pending");
        assert_eq!(VoiceLinkStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_schedule_details_default_is_empty() {
        assert!(ScheduleDetails::default().is_empty());
    }
}
