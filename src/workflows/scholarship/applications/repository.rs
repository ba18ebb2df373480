use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{ApplicationNumber, ApplicationRecord, DocumentKind};
use super::ledger::StepValue;

/// Storage abstraction over the scholarship table so the service can be
/// exercised against an in-memory implementation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    /// Compare-and-swap write: fails with `VersionConflict` unless the stored
    /// record still carries `expected_version`.
    fn update(&self, record: ApplicationRecord, expected_version: u64)
        -> Result<(), RepositoryError>;
    fn fetch(
        &self,
        number: ApplicationNumber,
    ) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("stale application version (expected {expected}, stored {stored})")]
    VersionConflict { expected: u64, stored: u64 },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Email sent to the applicant when a status change lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotification {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Outbound mail hook. Best-effort: the caller logs failures and never
/// retries or rolls back the status change.
pub trait NotificationGateway: Send + Sync {
    fn send(&self, notification: StatusNotification) -> Result<(), NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Blob storage for the five document slots.
pub trait DocumentStore: Send + Sync {
    fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("document storage unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized projection of an application for API responses: status label,
/// remark, the replayed step snapshot, and the version the caller must echo
/// back on the next write.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusView {
    pub application_number: ApplicationNumber,
    pub status: &'static str,
    pub remark: String,
    pub version: u64,
    pub steps: Vec<StepView>,
    pub document_urls: BTreeMap<DocumentKind, Option<String>>,
}

/// One verification step as exposed to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub label: &'static str,
    pub value: &'static str,
    pub admin_name: String,
}

impl ApplicationRecord {
    pub fn status_view(&self) -> ApplicationStatusView {
        let snapshot = self.ledger.snapshot();
        let steps = snapshot
            .steps()
            .iter()
            .map(|step| StepView {
                label: step.label,
                value: step.value.label(),
                admin_name: step.admin_name.clone(),
            })
            .collect();

        ApplicationStatusView {
            application_number: self.application_number,
            status: self.status.label(),
            remark: self.remark.clone(),
            version: self.version,
            steps,
            document_urls: self.document_urls.clone(),
        }
    }

    /// True once the Verify step has been recorded as Yes in the ledger.
    pub fn verified(&self) -> bool {
        self.ledger.snapshot().value(0) == StepValue::Yes
    }
}
