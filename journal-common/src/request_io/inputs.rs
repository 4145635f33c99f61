use serde::{Deserialize, Serialize};

use crate::models::entry::{EntryDraft, EntryUpdate};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputEntry {
    pub work: String,
    pub struggle: String,
    pub intention: String,
}

impl From<InputEntry> for EntryDraft {
    fn from(input: InputEntry) -> Self {
        EntryDraft {
            id: None,
            work: input.work,
            struggle: input.struggle,
            intention: input.intention,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InputEntryUpdate {
    #[serde(default)]
    pub work: Option<String>,
    #[serde(default)]
    pub struggle: Option<String>,
    #[serde(default)]
    pub intention: Option<String>,
}

impl From<InputEntryUpdate> for EntryUpdate {
    fn from(input: InputEntryUpdate) -> Self {
        EntryUpdate {
            work: input.work,
            struggle: input.struggle,
            intention: input.intention,
        }
    }
}
