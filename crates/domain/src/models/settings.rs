//! School settings domain models (singleton configuration row).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// School-wide settings. Exactly one row, written via upsert.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SchoolSettings {
    pub school_name: String,
    pub academic_year: String,
    pub max_books_per_student: i32,
    /// Default deadline offset clients offer when composing an assignment.
    /// Each assignment's own `deadline` is what submission checks enforce.
    pub homework_submission_days: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_provider_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

/// Admin request to save settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 200, message = "School name is required"))]
    pub school_name: String,
    #[validate(length(min = 1, max = 20, message = "Academic year is required"))]
    pub academic_year: String,
    #[validate(range(min = 1, max = 50, message = "Books per student must be 1-50"))]
    pub max_books_per_student: i32,
    #[validate(range(min = 1, max = 90, message = "Submission window must be 1-90 days"))]
    pub homework_submission_days: i32,
    pub ai_provider_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_update_bounds() {
        let req = UpdateSettingsRequest {
            school_name: "SOSE Lajpat Nagar".into(),
            academic_year: "2026-27".into(),
            max_books_per_student: 3,
            homework_submission_days: 7,
            ai_provider_key: None,
        };
        assert!(req.validate().is_ok());

        let bad = UpdateSettingsRequest {
            max_books_per_student: 0,
            ..req
        };
        assert!(bad.validate().is_err());
    }
}
