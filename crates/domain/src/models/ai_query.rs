//! AI doubt-solving query domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A student's doubt, answered by the AI and optionally escalated to a
/// teacher.
///
/// Invariant: `teacher_response` is set only when `is_forwarded_to_teacher`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AiQuery {
    pub id: Uuid,
    pub student_id: Uuid,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,
    pub is_forwarded_to_teacher: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AiQuery {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }
}

/// Student request to record a doubt.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateAiQueryRequest {
    #[validate(length(min = 1, max = 4000, message = "Query text is required"))]
    pub query: String,
    pub ai_response: Option<String>,
}

/// Teacher's answer to a forwarded query.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct TeacherResponseRequest {
    #[validate(length(min = 1, max = 4000, message = "Response text is required"))]
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_response_requires_text() {
        let req = TeacherResponseRequest {
            response: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_resolved_flag() {
        let query = AiQuery {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            query: "What is photosynthesis?".into(),
            ai_response: Some("...".into()),
            is_forwarded_to_teacher: false,
            teacher_id: None,
            teacher_response: None,
            resolved_at: None,
            created_at: Utc::now(),
        };
        assert!(!query.is_resolved());
    }
}
