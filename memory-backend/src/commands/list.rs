//! List command - shows every fact, optionally filtered by tag

use memory_bank_types::MemoryBank;

use super::{Outcome, hashtags};
use crate::store;

/// Execute the list command
pub fn execute(bank: MemoryBank, tag: Option<&str>) -> Outcome {
    let entries = store::list(&bank, tag);

    let message = if entries.is_empty() {
        match tag {
            Some(t) => format!("📭 タグ #{} の記憶はありません", t),
            None => "📭 記憶はまだありません".to_string(),
        }
    } else {
        let header = match tag {
            Some(t) => format!("📚 タグ #{} の記憶一覧:", t),
            None => "📚 記憶一覧:".to_string(),
        };
        let mut lines = vec![header];
        for (key, entry) in &entries {
            if entry.tags.is_empty() {
                lines.push(format!("- {}: {}", key, entry.value));
            } else {
                lines.push(format!(
                    "- {}: {} (タグ: {})",
                    key,
                    entry.value,
                    hashtags(&entry.tags)
                ));
            }
        }
        lines.join("\n")
    };

    Outcome::unchanged(bank, message)
}
