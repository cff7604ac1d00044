//! Homework and submission domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Sentinel grade meaning "not graded yet".
pub const UNGRADED: i32 = 0;

/// A homework assignment for a class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Homework {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<Uuid>,
    pub deadline: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A student's submission for a homework assignment.
///
/// `grade` stays at the ungraded sentinel until the grading action runs;
/// re-grading overwrites the previous grade.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Submission {
    pub id: Uuid,
    pub homework_id: Uuid,
    pub student_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub grade: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graded_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graded_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.graded_at.is_some()
    }
}

/// Admin request to create or update a homework assignment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateHomeworkRequest {
    #[validate(length(min = 1, max = 300, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Subject is required"))]
    pub subject: String,
    pub class_id: Option<Uuid>,
    pub deadline: DateTime<Utc>,
    pub attachment_url: Option<String>,
}

/// Student request to submit homework.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SubmitHomeworkRequest {
    pub homework_id: Uuid,
    #[validate(length(max = 10_000))]
    pub content: Option<String>,
    pub attachment_url: Option<String>,
}

/// Admin request to grade a submission. Structured form state, keyed by
/// submission id at the route level.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct GradeSubmissionRequest {
    #[validate(custom(function = "shared::validation::validate_grade"))]
    pub grade: i32,
    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_grade_request_bounds() {
        let ok = GradeSubmissionRequest {
            grade: 85,
            feedback: Some("Good work".into()),
        };
        assert!(ok.validate().is_ok());

        let too_high = GradeSubmissionRequest {
            grade: 101,
            feedback: None,
        };
        assert!(too_high.validate().is_err());

        let negative = GradeSubmissionRequest {
            grade: -5,
            feedback: None,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_submission_graded_flag() {
        let submission = Submission {
            id: Uuid::new_v4(),
            homework_id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            content: None,
            attachment_url: None,
            submitted_at: Utc::now(),
            grade: UNGRADED,
            feedback: None,
            graded_by: None,
            graded_at: None,
        };
        assert!(!submission.is_graded());
    }
}
