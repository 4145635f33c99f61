use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::entries;

#[derive(
    Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Identifiable, Queryable, Selectable,
)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Entry {
    pub id: String,

    pub work: String,
    pub struggle: String,
    pub intention: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Applies the fields present in `update` and moves `updated_at` forward. `updated_at` never
    /// moves backward, even if the system clock does.
    pub fn apply_update(&mut self, update: &EntryUpdate, now: DateTime<Utc>) {
        if let Some(work) = &update.work {
            self.work.clone_from(work);
        }

        if let Some(struggle) = &update.struggle {
            self.struggle.clone_from(struggle);
        }

        if let Some(intention) = &update.intention {
            self.intention.clone_from(intention);
        }

        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEntry<'a> {
    pub id: &'a str,

    pub work: &'a str,
    pub struggle: &'a str,
    pub intention: &'a str,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Entry> for NewEntry<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: &entry.id,
            work: &entry.work,
            struggle: &entry.struggle,
            intention: &entry.intention,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Fields absent from the changeset (`None`) are left untouched by diesel. `updated_at` is not
/// part of it; the store sets that column itself so it can never move backward.
#[derive(Clone, Debug, AsChangeset)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EntryChangeset<'a> {
    pub work: Option<&'a str>,
    pub struggle: Option<&'a str>,
    pub intention: Option<&'a str>,
}

impl<'a> From<&'a EntryUpdate> for EntryChangeset<'a> {
    fn from(update: &'a EntryUpdate) -> Self {
        Self {
            work: update.work.as_deref(),
            struggle: update.struggle.as_deref(),
            intention: update.intention.as_deref(),
        }
    }
}

/// An entry that has not been stored yet. The ID and timestamps are filled in by
/// `into_entry()` when the record is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub id: Option<String>,

    pub work: String,
    pub struggle: String,
    pub intention: String,
}

impl EntryDraft {
    pub fn new(work: &str, struggle: &str, intention: &str) -> Self {
        Self {
            id: None,
            work: String::from(work),
            struggle: String::from(struggle),
            intention: String::from(intention),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(String::from(id));
        self
    }

    pub fn into_entry(self, now: DateTime<Utc>) -> Entry {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::now_v7().to_string(),
        };

        Entry {
            id,
            work: self.work,
            struggle: self.struggle,
            intention: self.intention,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryUpdate {
    #[serde(default)]
    pub work: Option<String>,
    #[serde(default)]
    pub struggle: Option<String>,
    #[serde(default)]
    pub intention: Option<String>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.work.is_none() && self.struggle.is_none() && self.intention.is_none()
    }
}
