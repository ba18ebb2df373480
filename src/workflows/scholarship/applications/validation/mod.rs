mod config;
mod rules;

pub use config::DocumentPolicy;
pub use rules::{
    validate_bank, validate_contact, validate_documentation, validate_educational,
    validate_personal,
};

use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::ApplicationSubmission;

/// Per-field error messages for one section. Empty map means the section is
/// valid. Recomputed on every pass, never persisted.
pub type SectionErrors = BTreeMap<String, String>;

/// The five independently validated form sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Personal,
    Contact,
    Educational,
    Bank,
    Documentation,
}

impl Section {
    pub const fn label(self) -> &'static str {
        match self {
            Section::Personal => "personal",
            Section::Contact => "contact",
            Section::Educational => "educational",
            Section::Bank => "bank",
            Section::Documentation => "documentation",
        }
    }
}

/// Outcome of validating a whole submission: only sections with errors are
/// present, so an empty report admits the submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub sections: BTreeMap<Section, SectionErrors>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, section: Section) -> Option<&SectionErrors> {
        self.sections.get(&section)
    }

    fn push(&mut self, section: Section, errors: SectionErrors) {
        if !errors.is_empty() {
            self.sections.insert(section, errors);
        }
    }
}

/// Run every section validator. Sections are checked independently; the
/// submission is admitted only when all five come back clean.
pub fn validate_submission(
    submission: &ApplicationSubmission,
    policy: &DocumentPolicy,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.push(Section::Personal, validate_personal(&submission.personal));
    report.push(Section::Contact, validate_contact(&submission.contact));
    report.push(
        Section::Educational,
        validate_educational(&submission.educational),
    );
    report.push(Section::Bank, validate_bank(&submission.bank));
    report.push(
        Section::Documentation,
        validate_documentation(&submission.documentation, policy),
    );

    report
}
