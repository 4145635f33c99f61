use serde::{Deserialize, Serialize};

use crate::models::entry::Entry;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputEntryCreated {
    pub detail: String,
    pub entry: Entry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputEntryList {
    pub entries: Vec<Entry>,
    pub count: usize,
}

impl From<Vec<Entry>> for OutputEntryList {
    fn from(entries: Vec<Entry>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputDetail {
    pub detail: String,
}

impl OutputDetail {
    pub fn new(detail: &str) -> Self {
        Self {
            detail: String::from(detail),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerErrorResponse {
    pub err_type: String,
    pub detail: String,
}
