//! Memory bank operations
//!
//! Pure transformations over an in-memory [`MemoryBank`]. Nothing here touches storage;
//! the caller decides whether a mutated bank is written back.

use chrono::{DateTime, Utc};
use memory_bank_types::{MemoryBank, MemoryEntry};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Save `value` under `key`, replacing any existing entry.
pub fn save<'a>(
    bank: &'a mut MemoryBank,
    key: &str,
    value: &str,
    tags: &[String],
) -> Result<&'a MemoryEntry, StoreError> {
    save_at(bank, key, value, tags, Utc::now())
}

/// Save with an explicit clock.
///
/// Overwriting a key resets `created_at` as well as `updated_at`: the previous entry is
/// replaced wholesale and never consulted.
pub fn save_at<'a>(
    bank: &'a mut MemoryBank,
    key: &str,
    value: &str,
    tags: &[String],
    now: DateTime<Utc>,
) -> Result<&'a MemoryEntry, StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidArgument(
            "key must be a non-empty string".to_string(),
        ));
    }

    let entry = MemoryEntry {
        value: value.to_string(),
        tags: tags.to_vec(),
        created_at: Some(now),
        updated_at: Some(now),
    };
    bank.metadata.last_updated = Some(now);

    // An existing key keeps its position; new keys are appended.
    let (index, _) = bank.memories.insert_full(key.to_string(), entry);
    Ok(&bank.memories[index])
}

pub fn get<'a>(bank: &'a MemoryBank, key: &str) -> Option<&'a MemoryEntry> {
    bank.memories.get(key)
}

/// Remove `key`, returning the removed entry. Missing keys leave the bank untouched.
pub fn delete(bank: &mut MemoryBank, key: &str) -> Option<MemoryEntry> {
    delete_at(bank, key, Utc::now())
}

pub fn delete_at(bank: &mut MemoryBank, key: &str, now: DateTime<Utc>) -> Option<MemoryEntry> {
    let removed = bank.memories.shift_remove(key)?;
    bank.metadata.last_updated = Some(now);
    Some(removed)
}

/// Entries carrying `tag` (exact, case-sensitive), or every entry without a filter.
pub fn list<'a>(bank: &'a MemoryBank, tag: Option<&str>) -> Vec<(&'a str, &'a MemoryEntry)> {
    bank.memories
        .iter()
        .filter(|(_, entry)| tag.is_none_or(|t| entry.has_tag(t)))
        .map(|(key, entry)| (key.as_str(), entry))
        .collect()
}
