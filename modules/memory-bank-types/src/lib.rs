//! Shared types for the memory bank document and its storage clients.
//!
//! The whole bank lives in a single JSON document:
//!
//! ```json
//! {
//!   "memories": {
//!     "coffee": {
//!       "value": "oat latte, no sugar",
//!       "tags": ["food"],
//!       "created_at": "2026-01-04T09:12:44.120Z",
//!       "updated_at": "2026-01-04T09:12:44.120Z"
//!     }
//!   },
//!   "metadata": { "last_updated": "2026-01-04T09:12:44.120Z" }
//! }
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =====================================================
// Domain Types
// =====================================================

/// One stored fact. Only `value` is required; entries written by hand may lack the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub value: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `"tags": null` reads as no tags
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl MemoryEntry {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Bank-level bookkeeping. Members other than `last_updated` are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The whole persisted document. Entries keep the document's key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryBank {
    #[serde(default)]
    pub memories: IndexMap<String, MemoryEntry>,
    #[serde(default)]
    pub metadata: BankMetadata,
}

// =====================================================
// Document Boundary
// =====================================================

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed memory document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("memory document contains an empty key")]
    EmptyKey,
}

impl MemoryBank {
    /// Parse and validate a stored document. Blank content is a bank that was never written.
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let bank: MemoryBank = serde_json::from_str(content)?;
        if bank.memories.keys().any(|k| k.is_empty()) {
            return Err(DocumentError::EmptyKey);
        }
        Ok(bank)
    }

    /// Serialize the form written back to storage: two-space indent plus a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }
}
