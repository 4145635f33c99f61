use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::db::{DaoError, EntryRepository};
use crate::models::entry::{Entry, EntryDraft, EntryUpdate};

/// Keeps entries in process memory. Used by tests and when the server runs without a database.
#[derive(Default)]
pub struct InMemoryDao {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryDao {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryRepository for InMemoryDao {
    async fn create_entry(&self, draft: EntryDraft) -> Result<Entry, DaoError> {
        let entry = draft.into_entry(Utc::now());

        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.id) {
            return Err(DaoError::ConstraintViolation(format!(
                "An entry with ID '{}' already exists",
                entry.id
            )));
        }

        entries.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn get_all_entries(&self) -> Result<Vec<Entry>, DaoError> {
        let mut all_entries: Vec<Entry> = self.entries.read().await.values().cloned().collect();
        all_entries.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));

        Ok(all_entries)
    }

    async fn get_entry(&self, entry_id: &str) -> Result<Option<Entry>, DaoError> {
        Ok(self.entries.read().await.get(entry_id).cloned())
    }

    async fn update_entry(
        &self,
        entry_id: &str,
        update: &EntryUpdate,
    ) -> Result<Option<Entry>, DaoError> {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(entry_id) else {
            return Ok(None);
        };

        entry.apply_update(update, Utc::now());
        Ok(Some(entry.clone()))
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<bool, DaoError> {
        Ok(self.entries.write().await.remove(entry_id).is_some())
    }

    async fn delete_all_entries(&self) -> Result<(), DaoError> {
        self.entries.write().await.clear();
        Ok(())
    }
}
