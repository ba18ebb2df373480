//! Scholarship application intake, validation, and admin review workflow.
//!
//! The validation gate admits or rejects each form section, the transition
//! table governs the admin review statuses, and the verification ledger keeps
//! the append-only audit of review actions. Persistence, mail, and document
//! storage stay behind the gateway traits in `repository`.

pub mod domain;
pub mod infra;
pub mod ledger;
pub mod repository;
pub mod router;
pub mod service;
pub mod transitions;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AdminAction, AdminIdentity, ApplicationNumber, ApplicationRecord, ApplicationStatus,
    ApplicationSubmission, BankDetails, ContactDetails, DocumentKind, DocumentUpload,
    EducationalDetails, PersonalDetails,
};
pub use ledger::{LedgerEntry, StepSnapshot, StepValue, VerificationLedger, STEP_COUNT};
pub use repository::{
    ApplicationRepository, ApplicationStatusView, DocumentStore, NotificationError,
    NotificationGateway, RepositoryError, StatusNotification, StepView, StorageError,
};
pub use router::application_router;
pub use service::{ApplicationServiceError, ScholarshipApplicationService};
pub use transitions::{can_transition, TransitionError};
pub use validation::{
    validate_submission, DocumentPolicy, Section, SectionErrors, ValidationReport,
};
