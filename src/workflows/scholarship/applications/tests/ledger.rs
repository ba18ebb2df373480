use chrono::Utc;

use crate::workflows::scholarship::applications::domain::AdminAction;
use crate::workflows::scholarship::applications::ledger::{
    StepValue, VerificationLedger, STEP_COUNT,
};

fn ledger_with(actions: &[AdminAction]) -> VerificationLedger {
    let mut ledger = VerificationLedger::default();
    for action in actions {
        ledger.record(*action, "Priya Menon".to_string(), Utc::now());
    }
    ledger
}

#[test]
fn empty_ledger_materializes_all_five_steps() {
    let snapshot = VerificationLedger::default().snapshot();
    assert_eq!(snapshot.steps().len(), STEP_COUNT);
    for index in 0..STEP_COUNT {
        assert_eq!(snapshot.value(index), StepValue::Empty);
        assert_eq!(snapshot.step(index).admin_name, "Unknown Admin");
    }
    assert_eq!(snapshot.step(2).label, "Amount Proceed");
}

#[test]
fn verify_sets_step_zero_and_clears_the_rest() {
    let ledger = ledger_with(&[AdminAction::Verify]);
    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.value(0), StepValue::Yes);
    assert_eq!(snapshot.step(0).admin_name, "Priya Menon");
    for index in 1..STEP_COUNT {
        assert_eq!(snapshot.value(index), StepValue::Empty);
    }
}

#[test]
fn forward_path_marks_each_step_in_turn() {
    let ledger = ledger_with(&[
        AdminAction::Verify,
        AdminAction::Select,
        AdminAction::AmountProceed,
    ]);
    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.value(0), StepValue::Yes);
    assert_eq!(snapshot.value(1), StepValue::Yes);
    assert_eq!(snapshot.value(2), StepValue::Yes);
    assert_eq!(snapshot.value(3), StepValue::Empty);
    assert_eq!(snapshot.value(4), StepValue::Empty);
}

#[test]
fn reject_zeroes_forward_steps_and_sets_itself() {
    for prior in [
        vec![],
        vec![AdminAction::Verify],
        vec![AdminAction::Verify, AdminAction::Select],
        vec![AdminAction::Verify, AdminAction::Reverted],
    ] {
        let mut actions = prior.clone();
        actions.push(AdminAction::Reject);
        let snapshot = ledger_with(&actions).snapshot();

        assert_eq!(snapshot.value(0), StepValue::No, "prior {prior:?}");
        assert_eq!(snapshot.value(1), StepValue::No, "prior {prior:?}");
        assert_eq!(snapshot.value(2), StepValue::No, "prior {prior:?}");
        assert_eq!(snapshot.value(3), StepValue::Yes, "prior {prior:?}");
        assert_eq!(snapshot.value(4), StepValue::Empty, "prior {prior:?}");
    }
}

#[test]
fn verify_after_reject_resets_steps_one_through_four() {
    let ledger = ledger_with(&[AdminAction::Reject, AdminAction::Verify]);
    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.value(0), StepValue::Yes);
    for index in 1..STEP_COUNT {
        assert_eq!(snapshot.value(index), StepValue::Empty);
    }
}

#[test]
fn reverted_leaves_prior_steps_untouched() {
    let ledger = ledger_with(&[AdminAction::Verify, AdminAction::Reverted]);
    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.value(0), StepValue::Yes);
    assert_eq!(snapshot.value(4), StepValue::Yes);
    assert_eq!(snapshot.value(1), StepValue::Empty);
}

#[test]
fn audit_entries_are_append_only_and_ordered() {
    let ledger = ledger_with(&[AdminAction::Verify, AdminAction::Select, AdminAction::Reject]);
    let actions: Vec<_> = ledger.entries().iter().map(|entry| entry.action).collect();
    assert_eq!(
        actions,
        vec![AdminAction::Verify, AdminAction::Select, AdminAction::Reject]
    );
}
