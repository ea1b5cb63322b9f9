//! Chat-driven memory bank backed by a JSON file in a GitHub repository.
//!
//! `commands::parse` turns a chat message into a [`commands::Command`], `commands::apply` runs it
//! against a [`memory_bank_types::MemoryBank`], and [`bot::MemoryBot`] wires both to a
//! [`storage::DocumentStore`].

pub mod bot;
pub mod commands;
pub mod config;
pub mod http;
pub mod storage;
pub mod store;

pub use memory_bank_types::{BankMetadata, DocumentError, MemoryBank, MemoryEntry};
