//! Remote storage for the memory document
//!
//! The bot only needs two calls: fetch the whole document with its version token, and write
//! the whole document back conditioned on that token.

pub mod github;

pub use github::GithubContentStore;

use async_trait::async_trait;

/// The document as last seen in storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// UTF-8 document text; empty when the file does not exist yet
    pub content: String,
    /// Opaque revision id; `None` when the file does not exist yet
    pub version: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("storage unreachable: {0}")]
    Network(String),
    #[error("storage rejected credentials ({status}): {body}")]
    Unauthorized { status: u16, body: String },
    #[error("document changed since it was read ({status})")]
    Conflict { status: u16 },
    #[error("storage returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid storage payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the current document and its version token
    async fn fetch(&self) -> Result<Snapshot, TransportError>;

    /// Replace the document, failing with [`TransportError::Conflict`] if `version` is stale.
    /// Returns the new version token.
    async fn write(
        &self,
        content: &str,
        version: Option<&str>,
        message: &str,
    ) -> Result<String, TransportError>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}
