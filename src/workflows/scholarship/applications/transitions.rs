use super::domain::{AdminAction, ApplicationStatus};
use super::ledger::{StepSnapshot, StepValue};

/// Errors raised when a review action is refused before touching the record.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot apply {action:?} to an application in status {from:?}")]
    Illegal {
        from: ApplicationStatus,
        action: AdminAction,
    },
    #[error("caller is not an administrator")]
    NotAuthorized,
}

/// Server-side legality check for a review action. The ledger snapshot is an
/// input so the ordering guards hold regardless of what the admin UI offered:
/// `Select` requires a recorded Verify, `AmountProceed` requires both Verify
/// and Select.
pub fn can_transition(
    from: ApplicationStatus,
    action: AdminAction,
    snapshot: &StepSnapshot,
) -> bool {
    match action {
        AdminAction::Verify => matches!(
            from,
            ApplicationStatus::Pending | ApplicationStatus::Updated
        ),
        AdminAction::Select => {
            from == ApplicationStatus::Verify && snapshot.value(0) == StepValue::Yes
        }
        AdminAction::AmountProceed => {
            from == ApplicationStatus::Select
                && snapshot.value(0) == StepValue::Yes
                && snapshot.value(1) == StepValue::Yes
        }
        AdminAction::Reject => true,
        AdminAction::Reverted => from == ApplicationStatus::Verify,
    }
}
