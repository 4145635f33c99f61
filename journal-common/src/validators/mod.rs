use crate::request_io::{InputEntry, InputEntryUpdate};

pub const MAX_ENTRY_FIELD_CHARS: usize = 256;

#[derive(Debug)]
pub enum Validity {
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        match &self {
            Validity::Valid => true,
            Validity::Invalid(_) => false,
        }
    }
}

/// Length is counted in characters, not bytes. Empty text is valid.
pub fn validate_entry_field(field_name: &str, text: &str) -> Validity {
    let char_count = text.chars().count();

    if char_count > MAX_ENTRY_FIELD_CHARS {
        return Validity::Invalid(format!(
            "'{field_name}' is too long ({char_count} characters). Max: {MAX_ENTRY_FIELD_CHARS} characters",
        ));
    }

    Validity::Valid
}

pub fn validate_new_entry(entry: &InputEntry) -> Validity {
    let fields = [
        ("work", entry.work.as_str()),
        ("struggle", entry.struggle.as_str()),
        ("intention", entry.intention.as_str()),
    ];

    for (field_name, text) in fields {
        if let Validity::Invalid(msg) = validate_entry_field(field_name, text) {
            return Validity::Invalid(msg);
        }
    }

    Validity::Valid
}

pub fn validate_entry_update(update: &InputEntryUpdate) -> Validity {
    let fields = [
        ("work", update.work.as_deref()),
        ("struggle", update.struggle.as_deref()),
        ("intention", update.intention.as_deref()),
    ];

    for (field_name, text) in fields {
        let Some(text) = text else {
            continue;
        };

        if let Validity::Invalid(msg) = validate_entry_field(field_name, text) {
            return Validity::Invalid(msg);
        }
    }

    Validity::Valid
}
