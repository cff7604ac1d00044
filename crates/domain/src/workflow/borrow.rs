//! Borrow request transition table.

use chrono::{DateTime, Duration, Utc};

use crate::models::borrow_request::BorrowRequestStatus;

use super::WorkflowError;

/// How long an issued book may be kept.
pub const BORROW_PERIOD_DAYS: i64 = 14;

/// Actions an admin can take on a borrow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowAction {
    Approve,
    Reject,
    Return,
}

impl BorrowAction {
    fn name(&self) -> &'static str {
        match self {
            BorrowAction::Approve => "approve",
            BorrowAction::Reject => "reject",
            BorrowAction::Return => "return",
        }
    }
}

/// Side effects of approving a request: dates stamped on the request plus the
/// stock decrement applied to the book in the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalEffects {
    pub issue_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub copies_delta: i32,
}

/// Outcome of a legal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowTransition {
    Approved(ApprovalEffects),
    Rejected,
    /// Book handed back; stock is restored.
    Returned { copies_delta: i32 },
}

impl BorrowTransition {
    pub fn new_status(&self) -> BorrowRequestStatus {
        match self {
            BorrowTransition::Approved(_) => BorrowRequestStatus::Approved,
            BorrowTransition::Rejected => BorrowRequestStatus::Rejected,
            BorrowTransition::Returned { .. } => BorrowRequestStatus::Returned,
        }
    }
}

/// Decides whether `action` is legal from `status` and computes the side
/// effects. Approval additionally requires stock on hand; the repository
/// re-verifies that with a guarded decrement at commit time.
pub fn request_transition(
    status: BorrowRequestStatus,
    action: BorrowAction,
    available_copies: i32,
    now: DateTime<Utc>,
) -> Result<BorrowTransition, WorkflowError> {
    match (status, action) {
        (BorrowRequestStatus::Pending, BorrowAction::Approve) => {
            if available_copies <= 0 {
                return Err(WorkflowError::NoCopiesAvailable);
            }
            Ok(BorrowTransition::Approved(ApprovalEffects {
                issue_date: now,
                return_date: now + Duration::days(BORROW_PERIOD_DAYS),
                copies_delta: -1,
            }))
        }
        (BorrowRequestStatus::Pending, BorrowAction::Reject) => Ok(BorrowTransition::Rejected),
        (BorrowRequestStatus::Approved, BorrowAction::Return) => {
            Ok(BorrowTransition::Returned { copies_delta: 1 })
        }
        (status, action) => Err(WorkflowError::illegal(status, action.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_pending_with_stock() {
        let now = Utc::now();
        let transition =
            request_transition(BorrowRequestStatus::Pending, BorrowAction::Approve, 1, now)
                .unwrap();
        match transition {
            BorrowTransition::Approved(effects) => {
                assert_eq!(effects.issue_date, now);
                assert_eq!(effects.return_date, now + Duration::days(14));
                assert_eq!(effects.copies_delta, -1);
            }
            other => panic!("expected approval, got {other:?}"),
        }
    }

    #[test]
    fn test_approve_refused_without_stock() {
        let err = request_transition(
            BorrowRequestStatus::Pending,
            BorrowAction::Approve,
            0,
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, WorkflowError::NoCopiesAvailable);
    }

    #[test]
    fn test_reject_pending() {
        let transition = request_transition(
            BorrowRequestStatus::Pending,
            BorrowAction::Reject,
            0,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(transition, BorrowTransition::Rejected);
        assert_eq!(transition.new_status(), BorrowRequestStatus::Rejected);
    }

    #[test]
    fn test_return_restores_stock() {
        let transition = request_transition(
            BorrowRequestStatus::Approved,
            BorrowAction::Return,
            0,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(transition, BorrowTransition::Returned { copies_delta: 1 });
    }

    #[test]
    fn test_terminal_states_refuse_everything() {
        for status in [BorrowRequestStatus::Rejected, BorrowRequestStatus::Returned] {
            for action in [BorrowAction::Approve, BorrowAction::Reject, BorrowAction::Return] {
                let err = request_transition(status, action, 5, Utc::now()).unwrap_err();
                assert!(matches!(err, WorkflowError::IllegalTransition { .. }));
            }
        }
    }

    #[test]
    fn test_approved_cannot_be_approved_again() {
        let err = request_transition(
            BorrowRequestStatus::Approved,
            BorrowAction::Approve,
            5,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, WorkflowError::IllegalTransition { .. }));
    }
}
