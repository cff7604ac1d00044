//! AI query response gate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::ai_query::AiQuery;

use super::WorkflowError;

/// The field values a legal teacher response writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherResponse {
    pub teacher_id: Uuid,
    pub teacher_response: String,
    pub resolved_at: DateTime<Utc>,
}

/// Validates that a teacher may respond to `query`.
///
/// Responding is only legal once the student has forwarded the query; an
/// unforwarded query is rejected and must remain untouched.
pub fn respond(
    query: &AiQuery,
    teacher_id: Uuid,
    response: &str,
    now: DateTime<Utc>,
) -> Result<TeacherResponse, WorkflowError> {
    if !query.is_forwarded_to_teacher {
        return Err(WorkflowError::NotForwarded);
    }
    Ok(TeacherResponse {
        teacher_id,
        teacher_response: response.trim().to_string(),
        resolved_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(forwarded: bool) -> AiQuery {
        AiQuery {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            query: "Why is the sky blue?".into(),
            ai_response: Some("Rayleigh scattering.".into()),
            is_forwarded_to_teacher: forwarded,
            teacher_id: None,
            teacher_response: None,
            resolved_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_respond_to_forwarded_query() {
        let now = Utc::now();
        let update = respond(&query(true), Uuid::new_v4(), "  See chapter 3. ", now).unwrap();
        assert_eq!(update.teacher_response, "See chapter 3.");
        assert_eq!(update.resolved_at, now);
    }

    #[test]
    fn test_respond_to_unforwarded_query_rejected() {
        let err = respond(&query(false), Uuid::new_v4(), "answer", Utc::now()).unwrap_err();
        assert_eq!(err, WorkflowError::NotForwarded);
    }
}
