use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::domain::{
    AdminAction, AdminIdentity, ApplicationNumber, ApplicationRecord, ApplicationStatus,
    ApplicationSubmission, DocumentKind, DocumentUpload,
};
use super::repository::{
    ApplicationRepository, DocumentStore, NotificationGateway, RepositoryError,
    StatusNotification,
};
use super::transitions::{can_transition, TransitionError};
use super::validation::{validate_submission, DocumentPolicy, ValidationReport};

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_number() -> ApplicationNumber {
    ApplicationNumber(APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Service composing the validation gate, the status state machine, and the
/// persistence, storage, and notification gateways.
pub struct ScholarshipApplicationService<R, N, S> {
    repository: Arc<R>,
    notifier: Arc<N>,
    documents: Arc<S>,
    policy: DocumentPolicy,
}

impl<R, N, S> ScholarshipApplicationService<R, N, S>
where
    R: ApplicationRepository + 'static,
    N: NotificationGateway + 'static,
    S: DocumentStore + 'static,
{
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        documents: Arc<S>,
        policy: DocumentPolicy,
    ) -> Self {
        Self {
            repository,
            notifier,
            documents,
            policy,
        }
    }

    /// Admit a new submission: every section must pass the validation gate,
    /// documents are stored (per-slot failures degrade to "not available"),
    /// and the record starts life as `Pending` with version 0.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let report = validate_submission(&submission, &self.policy);
        if !report.is_empty() {
            return Err(ApplicationServiceError::Validation(report));
        }

        let application_number = next_application_number();
        let document_urls = self.store_documents(application_number, &submission.documentation);

        let record = ApplicationRecord {
            application_number,
            applicant_email: submission.applicant_email,
            personal: submission.personal,
            contact: submission.contact,
            educational: submission.educational,
            bank: submission.bank,
            document_urls,
            status: ApplicationStatus::Pending,
            remark: String::new(),
            ledger: Default::default(),
            version: 0,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Apply an admin review action. The identity is explicit, the ordering
    /// guards run server-side against the replayed ledger, and the write is a
    /// compare-and-swap on the record version. A changed status notifies the
    /// applicant best-effort after the write lands.
    pub fn transition(
        &self,
        number: ApplicationNumber,
        action: AdminAction,
        identity: &AdminIdentity,
        remark: Option<String>,
        expected_version: u64,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        if !identity.is_admin {
            return Err(TransitionError::NotAuthorized.into());
        }

        let mut record = self
            .repository
            .fetch(number)?
            .ok_or(RepositoryError::NotFound)?;

        if record.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                stored: record.version,
            }
            .into());
        }

        let snapshot = record.ledger.snapshot();
        if !can_transition(record.status, action, &snapshot) {
            return Err(TransitionError::Illegal {
                from: record.status,
                action,
            }
            .into());
        }

        let previous_status = record.status;
        record
            .ledger
            .record(action, identity.ledger_name(), Utc::now());
        record.status = action.target_status();
        if let Some(remark) = remark {
            record.remark = remark;
        }
        record.version += 1;

        self.repository.update(record.clone(), expected_version)?;

        if record.status != previous_status {
            self.notify_status_change(&record, action);
        }

        Ok(record)
    }

    /// Applicant correction after a `Reverted` decision: the full gate runs
    /// again, sections are replaced, provided documents are re-uploaded, and
    /// the record moves to `Updated` for re-review.
    pub fn resubmit(
        &self,
        number: ApplicationNumber,
        submission: ApplicationSubmission,
        expected_version: u64,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let mut record = self
            .repository
            .fetch(number)?
            .ok_or(RepositoryError::NotFound)?;

        if record.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                stored: record.version,
            }
            .into());
        }

        if record.status != ApplicationStatus::Reverted {
            return Err(ApplicationServiceError::ResubmitClosed {
                status: record.status,
            });
        }

        let report = validate_submission(&submission, &self.policy);
        if !report.is_empty() {
            return Err(ApplicationServiceError::Validation(report));
        }

        let replacements = self.store_documents(number, &submission.documentation);
        for (kind, url) in replacements {
            // Slots are replace-only: a failed re-upload keeps the prior url.
            if url.is_some() {
                record.document_urls.insert(kind, url);
            }
        }

        record.applicant_email = submission.applicant_email;
        record.personal = submission.personal;
        record.contact = submission.contact;
        record.educational = submission.educational;
        record.bank = submission.bank;
        record.status = ApplicationStatus::Updated;
        record.version += 1;

        self.repository.update(record.clone(), expected_version)?;
        Ok(record)
    }

    pub fn get(
        &self,
        number: ApplicationNumber,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(number)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Applications awaiting first review, for the admin dashboard listing.
    pub fn pending(
        &self,
        limit: usize,
    ) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        Ok(self.repository.pending(limit)?)
    }

    fn store_documents(
        &self,
        number: ApplicationNumber,
        documentation: &BTreeMap<DocumentKind, DocumentUpload>,
    ) -> BTreeMap<DocumentKind, Option<String>> {
        let mut urls = BTreeMap::new();

        for kind in DocumentKind::ALL {
            let url = documentation.get(&kind).and_then(|upload| {
                let path = format!(
                    "applications/{}/{}/{}",
                    number,
                    kind.key(),
                    upload.file_name
                );
                match self.documents.upload(&path, &upload.data) {
                    Ok(url) => Some(url),
                    Err(error) => {
                        warn!(application = %number, document = kind.key(), %error,
                            "document upload failed, slot marked not available");
                        None
                    }
                }
            });
            urls.insert(kind, url);
        }

        urls
    }

    fn notify_status_change(&self, record: &ApplicationRecord, action: AdminAction) {
        let notification = match action {
            AdminAction::Reverted => StatusNotification {
                to_email: record.applicant_email.clone(),
                subject: format!(
                    "Scholarship application {} returned for correction",
                    record.application_number
                ),
                body: format!(
                    "Your scholarship application has been reverted for correction. \
                     Remark: {}. Please update the application and resubmit.",
                    record.remark
                ),
            },
            _ => StatusNotification {
                to_email: record.applicant_email.clone(),
                subject: format!(
                    "Scholarship application {} status update",
                    record.application_number
                ),
                body: format!(
                    "Your scholarship application is now marked {}.",
                    record.status.label()
                ),
            },
        };

        if let Err(error) = self.notifier.send(notification) {
            warn!(application = %record.application_number, %error,
                "status notification failed");
        }
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("submission failed validation")]
    Validation(ValidationReport),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("application in status {status:?} cannot be resubmitted")]
    ResubmitClosed { status: ApplicationStatus },
}
