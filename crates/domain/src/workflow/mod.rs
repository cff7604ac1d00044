//! Workflow engine: legal status transitions for request-like entities.
//!
//! Each submodule encodes one entity's transition table as a pure function
//! over closed status enums. Handlers consult the engine before any write;
//! a rejection carries a descriptive reason and guarantees nothing was
//! mutated.

pub mod ai_query;
pub mod borrow;
pub mod grading;
pub mod voicelink;

use thiserror::Error;

/// A rejected workflow action. Produced synchronously, before any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Cannot {action} a request in status '{from}'")]
    IllegalTransition { from: String, action: String },

    #[error("No copies available")]
    NoCopiesAvailable,

    #[error("Already attempted")]
    AlreadyAttempted,

    #[error("Test is not open for attempts")]
    TestClosed,

    #[error("Question index {0} is out of range")]
    QuestionOutOfRange(usize),

    #[error("Session is not in progress")]
    SessionNotInProgress,

    #[error("Grade {0} is out of range (0-100)")]
    GradeOutOfRange(i32),

    #[error("Query has not been forwarded to a teacher")]
    NotForwarded,
}

impl WorkflowError {
    pub(crate) fn illegal(from: impl std::fmt::Display, action: &str) -> Self {
        WorkflowError::IllegalTransition {
            from: from.to_string(),
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reasons_are_descriptive() {
        let err = WorkflowError::illegal("rejected", "approve");
        assert_eq!(err.to_string(), "Cannot approve a request in status 'rejected'");
        assert_eq!(
            WorkflowError::NoCopiesAvailable.to_string(),
            "No copies available"
        );
        assert_eq!(
            WorkflowError::AlreadyAttempted.to_string(),
            "Already attempted"
        );
    }
}
