//! In-process gateway adapters used by the binary and the test suites.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::info;

use super::domain::{ApplicationNumber, ApplicationRecord, ApplicationStatus};
use super::repository::{
    ApplicationRepository, DocumentStore, NotificationGateway, NotificationError,
    RepositoryError, StatusNotification, StorageError,
};

/// Mutex-guarded map standing in for the scholarship table. Updates are
/// compare-and-swap on the record version.
#[derive(Default, Clone)]
pub struct MemoryRepository {
    records: Arc<Mutex<BTreeMap<u64, ApplicationRecord>>>,
}

impl MemoryRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<u64, ApplicationRecord>>, RepositoryError>
    {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.application_number.0) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_number.0, record.clone());
        Ok(record)
    }

    fn update(
        &self,
        record: ApplicationRecord,
        expected_version: u64,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        let stored = guard
            .get(&record.application_number.0)
            .ok_or(RepositoryError::NotFound)?;
        if stored.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                stored: stored.version,
            });
        }
        guard.insert(record.application_number.0, record);
        Ok(())
    }

    fn fetch(
        &self,
        number: ApplicationNumber,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(&number.0).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .values()
            .filter(|record| {
                matches!(
                    record.status,
                    ApplicationStatus::Pending | ApplicationStatus::Updated
                )
            })
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Notifier that writes the outbound mail to the log instead of a mail
/// relay. Useful for local runs; real deployments swap in an SMTP adapter.
#[derive(Default, Clone)]
pub struct LoggingNotifier {
    from_address: String,
}

impl LoggingNotifier {
    pub fn new(from_address: String) -> Self {
        Self { from_address }
    }
}

impl NotificationGateway for LoggingNotifier {
    fn send(&self, notification: StatusNotification) -> Result<(), NotificationError> {
        info!(from = %self.from_address, to = %notification.to_email,
            subject = %notification.subject,
            "delivering status notification (log only)");
        Ok(())
    }
}

/// Document store returning `mem://` references without persisting bytes.
#[derive(Default, Clone)]
pub struct MemoryDocumentStore;

impl DocumentStore for MemoryDocumentStore {
    fn upload(&self, path: &str, _bytes: &[u8]) -> Result<String, StorageError> {
        Ok(format!("mem://{path}"))
    }
}
