use chrono::Utc;

use crate::workflows::scholarship::applications::domain::{AdminAction, ApplicationStatus};
use crate::workflows::scholarship::applications::ledger::VerificationLedger;
use crate::workflows::scholarship::applications::transitions::can_transition;

fn snapshot_after(actions: &[AdminAction]) -> VerificationLedger {
    let mut ledger = VerificationLedger::default();
    for action in actions {
        ledger.record(*action, "Priya Menon".to_string(), Utc::now());
    }
    ledger
}

#[test]
fn verify_is_allowed_from_pending_and_updated_only() {
    let empty = VerificationLedger::default().snapshot();
    assert!(can_transition(
        ApplicationStatus::Pending,
        AdminAction::Verify,
        &empty
    ));
    assert!(can_transition(
        ApplicationStatus::Updated,
        AdminAction::Verify,
        &empty
    ));
    for from in [
        ApplicationStatus::Verify,
        ApplicationStatus::Select,
        ApplicationStatus::AmountProceed,
        ApplicationStatus::Reject,
        ApplicationStatus::Reverted,
    ] {
        assert!(!can_transition(from, AdminAction::Verify, &empty), "{from:?}");
    }
}

#[test]
fn select_requires_verify_status_and_recorded_step_zero() {
    let verified = snapshot_after(&[AdminAction::Verify]).snapshot();
    assert!(can_transition(
        ApplicationStatus::Verify,
        AdminAction::Select,
        &verified
    ));

    // Right status but no recorded Verify step: the guard must hold even if a
    // client claims the status out of band.
    let empty = VerificationLedger::default().snapshot();
    assert!(!can_transition(
        ApplicationStatus::Verify,
        AdminAction::Select,
        &empty
    ));

    assert!(!can_transition(
        ApplicationStatus::Pending,
        AdminAction::Select,
        &verified
    ));
}

#[test]
fn amount_proceed_requires_both_verify_and_select_steps() {
    let full = snapshot_after(&[AdminAction::Verify, AdminAction::Select]).snapshot();
    assert!(can_transition(
        ApplicationStatus::Select,
        AdminAction::AmountProceed,
        &full
    ));

    let only_verified = snapshot_after(&[AdminAction::Verify]).snapshot();
    assert!(!can_transition(
        ApplicationStatus::Select,
        AdminAction::AmountProceed,
        &only_verified
    ));

    // Reject wiped the forward steps, so the ledger no longer supports it.
    let rejected = snapshot_after(&[AdminAction::Verify, AdminAction::Select, AdminAction::Reject])
        .snapshot();
    assert!(!can_transition(
        ApplicationStatus::Select,
        AdminAction::AmountProceed,
        &rejected
    ));
}

#[test]
fn reject_is_allowed_from_every_state() {
    let empty = VerificationLedger::default().snapshot();
    for from in [
        ApplicationStatus::Pending,
        ApplicationStatus::Verify,
        ApplicationStatus::Select,
        ApplicationStatus::AmountProceed,
        ApplicationStatus::Reject,
        ApplicationStatus::Reverted,
        ApplicationStatus::Updated,
    ] {
        assert!(can_transition(from, AdminAction::Reject, &empty), "{from:?}");
    }
}

#[test]
fn reverted_is_only_reachable_from_verify() {
    let verified = snapshot_after(&[AdminAction::Verify]).snapshot();
    assert!(can_transition(
        ApplicationStatus::Verify,
        AdminAction::Reverted,
        &verified
    ));
    for from in [
        ApplicationStatus::Pending,
        ApplicationStatus::Select,
        ApplicationStatus::AmountProceed,
        ApplicationStatus::Reject,
        ApplicationStatus::Updated,
    ] {
        assert!(!can_transition(from, AdminAction::Reverted, &verified), "{from:?}");
    }
}

#[test]
fn actions_map_to_their_target_statuses() {
    assert_eq!(AdminAction::Verify.target_status(), ApplicationStatus::Verify);
    assert_eq!(AdminAction::Select.target_status(), ApplicationStatus::Select);
    assert_eq!(
        AdminAction::AmountProceed.target_status(),
        ApplicationStatus::AmountProceed
    );
    assert_eq!(AdminAction::Reject.target_status(), ApplicationStatus::Reject);
    assert_eq!(
        AdminAction::Reverted.target_status(),
        ApplicationStatus::Reverted
    );
}
