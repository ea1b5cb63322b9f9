//! MemoryBot - runs one chat message against the remote memory document
//!
//! Each message is handled independently: one fetch, one compute, and at most one
//! conditional write. Nothing is cached between messages and failed writes are not retried.

use memory_bank_types::{DocumentError, MemoryBank};

use crate::commands;
use crate::storage::{DocumentStore, TransportError};
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct MemoryBot<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> MemoryBot<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one chat message. `Ok(None)` means the message was not a command.
    pub async fn handle(&self, text: &str) -> Result<Option<String>, BotError> {
        let Some(command) = commands::parse(text) else {
            return Ok(None);
        };
        log::debug!("[MemoryBot] {} command against {}", command.name(), self.store.describe());

        let snapshot = self.store.fetch().await?;
        let bank = MemoryBank::from_json(&snapshot.content)?;

        let outcome = commands::apply(bank, command)?;
        if let Some(change) = &outcome.change {
            let document = outcome.bank.to_json_pretty()?;
            self.store
                .write(&document, snapshot.version.as_deref(), change)
                .await?;
        }

        Ok(Some(outcome.message))
    }
}
