use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::workflows::scholarship::applications::domain::{
    AdminIdentity, ApplicationSubmission, BankDetails, ContactDetails, DocumentKind,
    DocumentUpload, EducationalDetails, PersonalDetails,
};
use crate::workflows::scholarship::applications::infra::{MemoryDocumentStore, MemoryRepository};
use crate::workflows::scholarship::applications::repository::{
    DocumentStore, NotificationError, NotificationGateway, StatusNotification, StorageError,
};
use crate::workflows::scholarship::applications::{DocumentPolicy, ScholarshipApplicationService};

pub(super) fn personal() -> PersonalDetails {
    PersonalDetails {
        name: "Asha".to_string(),
        dob: "2002-04-01".to_string(),
        gender: "female".to_string(),
        application_type: "fresh".to_string(),
        aadhar: "123456789012".to_string(),
        father_name: "Ravi".to_string(),
        mother_name: "Lakshmi".to_string(),
        father_occupation: "Farmer".to_string(),
        mother_occupation: "Homemaker".to_string(),
        father_phone: "9876543210".to_string(),
        student_phone: "9876543211".to_string(),
        mother_phone: None,
        alternative_number: None,
        income: "50000".to_string(),
    }
}

pub(super) fn contact() -> ContactDetails {
    ContactDetails {
        house: "Nandanam".to_string(),
        place: "Kalpetta".to_string(),
        country: "India".to_string(),
        post_office: "Kalpetta North".to_string(),
        pincode: "673121".to_string(),
        state: "Kerala".to_string(),
        district: "Wayanad".to_string(),
        whatsapp_number: "9876543211".to_string(),
        student_email: "asha@student.example".to_string(),
        alternative_number: None,
    }
}

pub(super) fn educational() -> EducationalDetails {
    EducationalDetails {
        college: "Government Engineering College".to_string(),
        branch: "Computer Science".to_string(),
        semester: "S5".to_string(),
        cgpa: "8.4".to_string(),
    }
}

pub(super) fn bank() -> BankDetails {
    BankDetails {
        ifsc: "SBIN0001234".to_string(),
        bank_name: "State Bank of India".to_string(),
        branch_name: "Kalpetta".to_string(),
        account_holder: "Asha".to_string(),
        account_number: "123456789012".to_string(),
    }
}

pub(super) fn documentation() -> BTreeMap<DocumentKind, DocumentUpload> {
    DocumentKind::ALL
        .into_iter()
        .map(|kind| {
            (
                kind,
                DocumentUpload {
                    file_name: format!("{}.pdf", kind.key()),
                    content_type: "application/pdf".to_string(),
                    size_bytes: 200 * 1024,
                    data: vec![0u8; 16],
                },
            )
        })
        .collect()
}

pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission {
        applicant_email: "asha@student.example".to_string(),
        personal: personal(),
        contact: contact(),
        educational: educational(),
        bank: bank(),
        documentation: documentation(),
    }
}

pub(super) fn admin() -> AdminIdentity {
    AdminIdentity {
        email: "admin@portal.example".to_string(),
        display_name: "Priya Menon".to_string(),
        is_admin: true,
    }
}

pub(super) fn non_admin() -> AdminIdentity {
    AdminIdentity {
        email: "asha@student.example".to_string(),
        display_name: "Asha".to_string(),
        is_admin: false,
    }
}

#[derive(Default, Clone)]
pub(super) struct RecordingNotifier {
    sent: Arc<Mutex<Vec<StatusNotification>>>,
}

impl RecordingNotifier {
    pub(super) fn sent(&self) -> Vec<StatusNotification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationGateway for RecordingNotifier {
    fn send(&self, notification: StatusNotification) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct FailingNotifier;

impl NotificationGateway for FailingNotifier {
    fn send(&self, _notification: StatusNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("relay offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct FailingDocumentStore;

impl DocumentStore for FailingDocumentStore {
    fn upload(&self, _path: &str, _bytes: &[u8]) -> Result<String, StorageError> {
        Err(StorageError::Unavailable("bucket offline".to_string()))
    }
}

pub(super) type TestService =
    ScholarshipApplicationService<MemoryRepository, RecordingNotifier, MemoryDocumentStore>;

pub(super) fn build_service() -> (Arc<TestService>, Arc<MemoryRepository>, Arc<RecordingNotifier>) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = Arc::new(ScholarshipApplicationService::new(
        repository.clone(),
        notifier.clone(),
        Arc::new(MemoryDocumentStore),
        DocumentPolicy::default(),
    ));
    (service, repository, notifier)
}
