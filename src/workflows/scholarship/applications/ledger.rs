use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::AdminAction;

/// Number of fixed verification steps tracked per application.
pub const STEP_COUNT: usize = 5;

const UNKNOWN_ADMIN: &str = "Unknown Admin";

/// Value a verification step can hold. `Empty` renders as "" on the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepValue {
    Yes,
    No,
    Empty,
}

impl StepValue {
    pub const fn label(self) -> &'static str {
        match self {
            StepValue::Yes => "Yes",
            StepValue::No => "No",
            StepValue::Empty => "",
        }
    }
}

/// One appended audit row: which action ran, who ran it, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub action: AdminAction,
    pub admin_name: String,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only audit log of review actions. This is the single source of
/// truth; the five-step snapshot is computed on read by replaying it, so the
/// audit trail and the step flags cannot fall out of sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationLedger {
    entries: Vec<LedgerEntry>,
}

impl VerificationLedger {
    pub fn record(&mut self, action: AdminAction, admin_name: String, recorded_at: DateTime<Utc>) {
        self.entries.push(LedgerEntry {
            action,
            admin_name,
            recorded_at,
        });
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Replay the log into the denormalized five-step view. All five steps are
    /// materialized even before any action runs.
    ///
    /// Step effects per action:
    /// - `Verify`: step 0 = Yes, steps 1-4 reset to Empty.
    /// - `Select`: step 1 = Yes. `AmountProceed`: step 2 = Yes.
    /// - `Reject`: steps 0-2 = No, step 3 = Yes, step 4 reset.
    /// - `Reverted`: step 4 = Yes, earlier steps untouched.
    pub fn snapshot(&self) -> StepSnapshot {
        let mut snapshot = StepSnapshot::empty();

        for entry in &self.entries {
            match entry.action {
                AdminAction::Verify => {
                    snapshot.set(0, StepValue::Yes, &entry.admin_name);
                    for index in 1..STEP_COUNT {
                        snapshot.clear(index);
                    }
                }
                AdminAction::Select => snapshot.set(1, StepValue::Yes, &entry.admin_name),
                AdminAction::AmountProceed => snapshot.set(2, StepValue::Yes, &entry.admin_name),
                AdminAction::Reject => {
                    for index in 0..3 {
                        snapshot.set(index, StepValue::No, &entry.admin_name);
                    }
                    snapshot.set(3, StepValue::Yes, &entry.admin_name);
                    snapshot.clear(4);
                }
                AdminAction::Reverted => snapshot.set(4, StepValue::Yes, &entry.admin_name),
            }
        }

        snapshot
    }
}

/// Denormalized per-step view of the ledger, one record per fixed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSnapshot {
    steps: [StepRecord; STEP_COUNT],
}

/// Outcome of one verification step after replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub label: &'static str,
    pub value: StepValue,
    pub admin_name: String,
}

const STEP_LABELS: [&str; STEP_COUNT] = ["Verify", "Select", "Amount Proceed", "Reject", "Reverted"];

impl StepSnapshot {
    fn empty() -> Self {
        let steps = STEP_LABELS.map(|label| StepRecord {
            label,
            value: StepValue::Empty,
            admin_name: UNKNOWN_ADMIN.to_string(),
        });
        Self { steps }
    }

    fn set(&mut self, index: usize, value: StepValue, admin_name: &str) {
        self.steps[index].value = value;
        self.steps[index].admin_name = admin_name.to_string();
    }

    fn clear(&mut self, index: usize) {
        self.steps[index].value = StepValue::Empty;
        self.steps[index].admin_name = UNKNOWN_ADMIN.to_string();
    }

    pub fn value(&self, index: usize) -> StepValue {
        self.steps[index].value
    }

    pub fn step(&self, index: usize) -> &StepRecord {
        &self.steps[index]
    }

    pub fn steps(&self) -> &[StepRecord; STEP_COUNT] {
        &self.steps
    }
}
