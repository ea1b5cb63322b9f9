//! Get command - recalls one fact

use memory_bank_types::MemoryBank;

use super::{Outcome, not_found_message, tag_suffix};
use crate::store;

/// Execute the get command
pub fn execute(bank: MemoryBank, key: &str) -> Outcome {
    let message = match store::get(&bank, key) {
        Some(entry) => format!("📝 {}: {}{}", key, entry.value, tag_suffix(&entry.tags)),
        None => not_found_message(key),
    };
    Outcome::unchanged(bank, message)
}
