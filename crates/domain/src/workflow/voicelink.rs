//! Counselling request transition table.

use crate::models::voicelink::{ScheduleDetails, VoiceLinkStatus};

use super::WorkflowError;

/// Actions a counsellor can take on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceLinkAction {
    Approve,
    Reject,
    Complete,
}

impl VoiceLinkAction {
    fn name(&self) -> &'static str {
        match self {
            VoiceLinkAction::Approve => "approve",
            VoiceLinkAction::Reject => "reject",
            VoiceLinkAction::Complete => "complete",
        }
    }
}

/// Decides the next status for a counselling request.
///
/// `rejected` and `completed` are terminal; nothing leaves them. Approval may
/// carry scheduling details, which the caller persists alongside the status.
pub fn request_transition(
    status: VoiceLinkStatus,
    action: VoiceLinkAction,
) -> Result<VoiceLinkStatus, WorkflowError> {
    match (status, action) {
        (VoiceLinkStatus::Pending, VoiceLinkAction::Approve) => Ok(VoiceLinkStatus::Approved),
        (VoiceLinkStatus::Pending, VoiceLinkAction::Reject)
        | (VoiceLinkStatus::Approved, VoiceLinkAction::Reject) => Ok(VoiceLinkStatus::Rejected),
        (VoiceLinkStatus::Approved, VoiceLinkAction::Complete) => Ok(VoiceLinkStatus::Completed),
        (status, action) => Err(WorkflowError::illegal(status, action.name())),
    }
}

/// Scheduling details are only meaningful on approval.
pub fn schedule_applies(action: VoiceLinkAction, details: &ScheduleDetails) -> bool {
    action == VoiceLinkAction::Approve && !details.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert_eq!(
            request_transition(VoiceLinkStatus::Pending, VoiceLinkAction::Approve).unwrap(),
            VoiceLinkStatus::Approved
        );
        assert_eq!(
            request_transition(VoiceLinkStatus::Pending, VoiceLinkAction::Reject).unwrap(),
            VoiceLinkStatus::Rejected
        );
        assert!(
            request_transition(VoiceLinkStatus::Pending, VoiceLinkAction::Complete).is_err()
        );
    }

    #[test]
    fn test_approved_transitions() {
        assert_eq!(
            request_transition(VoiceLinkStatus::Approved, VoiceLinkAction::Complete).unwrap(),
            VoiceLinkStatus::Completed
        );
        assert_eq!(
            request_transition(VoiceLinkStatus::Approved, VoiceLinkAction::Reject).unwrap(),
            VoiceLinkStatus::Rejected
        );
        assert!(
            request_transition(VoiceLinkStatus::Approved, VoiceLinkAction::Approve).is_err()
        );
    }

    #[test]
    fn test_terminal_states() {
        for status in [VoiceLinkStatus::Rejected, VoiceLinkStatus::Completed] {
            for action in [
                VoiceLinkAction::Approve,
                VoiceLinkAction::Reject,
                VoiceLinkAction::Complete,
            ] {
                assert!(request_transition(status, action).is_err());
            }
        }
    }

    #[test]
    fn test_schedule_only_on_approve() {
        let details = ScheduleDetails {
            meeting_link: Some("https://meet.example.com/abc".into()),
            ..Default::default()
        };
        assert!(schedule_applies(VoiceLinkAction::Approve, &details));
        assert!(!schedule_applies(VoiceLinkAction::Reject, &details));
        assert!(!schedule_applies(
            VoiceLinkAction::Approve,
            &ScheduleDetails::default()
        ));
    }
}
