use std::sync::Arc;

use crate::db::{DaoError, EntryRepository};
use crate::models::entry::{Entry, EntryDraft, EntryUpdate};

/// Sits between the HTTP handlers and whichever `EntryRepository` the server was started with.
/// A missing entry comes back as `None`; only storage failures are errors.
#[derive(Clone)]
pub struct EntryService {
    repository: Arc<dyn EntryRepository>,
}

impl EntryService {
    pub fn new(repository: Arc<dyn EntryRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_entry(&self, draft: EntryDraft) -> Result<Entry, DaoError> {
        let entry = self.repository.create_entry(draft).await?;
        log::debug!("Created entry {}", entry.id);

        Ok(entry)
    }

    pub async fn get_all_entries(&self) -> Result<Vec<Entry>, DaoError> {
        self.repository.get_all_entries().await
    }

    pub async fn get_entry(&self, entry_id: &str) -> Result<Option<Entry>, DaoError> {
        self.repository.get_entry(entry_id).await
    }

    pub async fn update_entry(
        &self,
        entry_id: &str,
        update: &EntryUpdate,
    ) -> Result<Option<Entry>, DaoError> {
        if update.is_empty() {
            log::debug!("Update for entry {entry_id} has no fields. Only updated_at will change");
        }

        let updated_entry = self.repository.update_entry(entry_id, update).await?;

        if updated_entry.is_none() {
            log::debug!("Entry {entry_id} not found for update");
        }

        Ok(updated_entry)
    }

    pub async fn delete_entry(&self, entry_id: &str) -> Result<bool, DaoError> {
        self.repository.delete_entry(entry_id).await
    }

    pub async fn delete_all_entries(&self) -> Result<(), DaoError> {
        self.repository.delete_all_entries().await?;
        log::debug!("Deleted all entries");

        Ok(())
    }
}
