//! Delete command - forgets one fact

use chrono::{DateTime, Utc};
use memory_bank_types::MemoryBank;

use super::{Outcome, not_found_message};
use crate::store;

/// Execute the delete command
pub fn execute(mut bank: MemoryBank, key: &str, now: DateTime<Utc>) -> Outcome {
    match store::delete_at(&mut bank, key, now) {
        Some(_) => {
            log::info!("[Commands] Deleted '{}'", key);
            Outcome {
                bank,
                message: format!("🗑️ 「{}」を削除しました", key),
                change: Some(format!("Delete memory: {}", key)),
            }
        }
        None => Outcome::unchanged(bank, not_found_message(key)),
    }
}
