//! Save command - stores a fact under a key

use chrono::{DateTime, Utc};
use memory_bank_types::MemoryBank;

use super::{Outcome, tag_suffix};
use crate::store::{self, StoreError};

/// Execute the save command
pub fn execute(
    mut bank: MemoryBank,
    key: &str,
    value: &str,
    tags: &[String],
    now: DateTime<Utc>,
) -> Result<Outcome, StoreError> {
    let replaced = store::get(&bank, key).is_some();
    store::save_at(&mut bank, key, value, tags, now)?;

    log::info!(
        "[Commands] Saved '{}' ({} tags{})",
        key,
        tags.len(),
        if replaced { ", replaced existing" } else { "" }
    );

    Ok(Outcome {
        bank,
        message: format!("✅ 記憶しました: {} = {}{}", key, value, tag_suffix(tags)),
        change: Some(format!("Save memory: {}", key)),
    })
}
