//! Submission grading gate.
//!
//! Grading is a field update rather than a strict state machine: any
//! submission may be graded, and grading again overwrites. The only gate is
//! input validation, applied before any write.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use shared::validation::MAX_GRADE;

use super::WorkflowError;

/// The field values a legal grading action writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeUpdate {
    pub grade: i32,
    pub feedback: Option<String>,
    pub graded_by: Uuid,
    pub graded_at: DateTime<Utc>,
}

/// Validates a grading action and computes the update to apply.
pub fn grade_submission(
    grade: i32,
    feedback: Option<String>,
    graded_by: Uuid,
    now: DateTime<Utc>,
) -> Result<GradeUpdate, WorkflowError> {
    if !(0..=MAX_GRADE).contains(&grade) {
        return Err(WorkflowError::GradeOutOfRange(grade));
    }
    Ok(GradeUpdate {
        grade,
        feedback: feedback.filter(|f| !f.trim().is_empty()),
        graded_by,
        graded_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_in_range() {
        let update = grade_submission(100, None, Uuid::new_v4(), Utc::now()).unwrap();
        assert_eq!(update.grade, 100);
        assert!(update.feedback.is_none());
    }

    #[test]
    fn test_grade_out_of_range() {
        assert_eq!(
            grade_submission(101, None, Uuid::new_v4(), Utc::now()).unwrap_err(),
            WorkflowError::GradeOutOfRange(101)
        );
        assert_eq!(
            grade_submission(-1, None, Uuid::new_v4(), Utc::now()).unwrap_err(),
            WorkflowError::GradeOutOfRange(-1)
        );
    }

    #[test]
    fn test_blank_feedback_dropped() {
        let update = grade_submission(70, Some("   ".into()), Uuid::new_v4(), Utc::now()).unwrap();
        assert!(update.feedback.is_none());

        let update =
            grade_submission(70, Some("Show working".into()), Uuid::new_v4(), Utc::now()).unwrap();
        assert_eq!(update.feedback.as_deref(), Some("Show working"));
    }
}
