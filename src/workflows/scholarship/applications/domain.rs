use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ledger::VerificationLedger;

/// Identifier assigned to an application at creation, monotonically increasing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ApplicationNumber(pub u64);

impl fmt::Display for ApplicationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal details section as the portal form collects it. Field names on the
/// wire keep the portal's historical spellings (`applicationtype` in particular).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub name: String,
    pub dob: String,
    pub gender: String,
    #[serde(rename = "applicationtype")]
    pub application_type: String,
    pub aadhar: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub mother_name: String,
    #[serde(default)]
    pub father_occupation: String,
    #[serde(default)]
    pub mother_occupation: String,
    pub father_phone: String,
    pub student_phone: String,
    #[serde(default)]
    pub mother_phone: Option<String>,
    #[serde(default)]
    pub alternative_number: Option<String>,
    pub income: String,
}

/// Contact and address section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub house: String,
    pub place: String,
    pub country: String,
    pub post_office: String,
    pub pincode: String,
    pub state: String,
    pub district: String,
    pub whatsapp_number: String,
    pub student_email: String,
    #[serde(default)]
    pub alternative_number: Option<String>,
}

/// Current enrollment section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalDetails {
    pub college: String,
    pub branch: String,
    pub semester: String,
    pub cgpa: String,
}

/// Disbursement account section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub ifsc: String,
    pub bank_name: String,
    pub branch_name: String,
    pub account_holder: String,
    pub account_number: String,
}

/// The five fixed document slots every application must fill.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Photo,
    ChequePassbook,
    AadharCard,
    CollegeId,
    IncomeCertificate,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Photo,
        DocumentKind::ChequePassbook,
        DocumentKind::AadharCard,
        DocumentKind::CollegeId,
        DocumentKind::IncomeCertificate,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DocumentKind::Photo => "Photo",
            DocumentKind::ChequePassbook => "Cheque / Passbook",
            DocumentKind::AadharCard => "Aadhar Card",
            DocumentKind::CollegeId => "College ID",
            DocumentKind::IncomeCertificate => "Income Certificate",
        }
    }

    /// Stable key used in storage paths and error maps.
    pub const fn key(self) -> &'static str {
        match self {
            DocumentKind::Photo => "photo",
            DocumentKind::ChequePassbook => "chequePassbook",
            DocumentKind::AadharCard => "aadharCard",
            DocumentKind::CollegeId => "collegeId",
            DocumentKind::IncomeCertificate => "incomeCertificate",
        }
    }
}

/// One uploaded document as received at the boundary. The declared content
/// type and size are what the documentation validator inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub data: Vec<u8>,
}

/// Everything an applicant sends in one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub applicant_email: String,
    pub personal: PersonalDetails,
    pub contact: ContactDetails,
    pub educational: EducationalDetails,
    pub bank: BankDetails,
    pub documentation: BTreeMap<DocumentKind, DocumentUpload>,
}

/// Review stage an application currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Verify,
    Select,
    AmountProceed,
    Reject,
    Reverted,
    Updated,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Verify => "Verify",
            ApplicationStatus::Select => "Select",
            ApplicationStatus::AmountProceed => "Amount Proceed",
            ApplicationStatus::Reject => "Reject",
            ApplicationStatus::Reverted => "Reverted",
            ApplicationStatus::Updated => "Updated",
        }
    }
}

/// Admin-initiated review actions. Each maps to one ledger step and one
/// target status; legality is decided by `transitions::can_transition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdminAction {
    Verify,
    Select,
    AmountProceed,
    Reject,
    Reverted,
}

impl AdminAction {
    pub const fn step_index(self) -> usize {
        match self {
            AdminAction::Verify => 0,
            AdminAction::Select => 1,
            AdminAction::AmountProceed => 2,
            AdminAction::Reject => 3,
            AdminAction::Reverted => 4,
        }
    }

    pub const fn step_label(self) -> &'static str {
        match self {
            AdminAction::Verify => "Verify",
            AdminAction::Select => "Select",
            AdminAction::AmountProceed => "Amount Proceed",
            AdminAction::Reject => "Reject",
            AdminAction::Reverted => "Reverted",
        }
    }

    pub const fn target_status(self) -> ApplicationStatus {
        match self {
            AdminAction::Verify => ApplicationStatus::Verify,
            AdminAction::Select => ApplicationStatus::Select,
            AdminAction::AmountProceed => ApplicationStatus::AmountProceed,
            AdminAction::Reject => ApplicationStatus::Reject,
            AdminAction::Reverted => ApplicationStatus::Reverted,
        }
    }
}

/// Identity of the caller driving a transition, passed explicitly into every
/// service call rather than read from ambient session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub email: String,
    pub display_name: String,
    pub is_admin: bool,
}

impl AdminIdentity {
    /// Name recorded on ledger entries; blank display names fall back to the
    /// portal's historical placeholder.
    pub fn ledger_name(&self) -> String {
        let trimmed = self.display_name.trim();
        if trimmed.is_empty() {
            "Unknown Admin".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Aggregate for one scholarship application: sections, review status, the
/// verification ledger, and an optimistic-concurrency version token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub application_number: ApplicationNumber,
    pub applicant_email: String,
    pub personal: PersonalDetails,
    pub contact: ContactDetails,
    pub educational: EducationalDetails,
    pub bank: BankDetails,
    pub document_urls: BTreeMap<DocumentKind, Option<String>>,
    pub status: ApplicationStatus,
    pub remark: String,
    pub ledger: VerificationLedger,
    pub version: u64,
}
