// core/src/stores/mod.rs

//! Backend seams: the durable key-value store that persists carts, the
//! remote catalog store, and the user directory.
//!
//! The traits describe the managed backend the application talks to; the
//! bundled implementations are local stand-ins (in-memory maps, a
//! file-per-key store) with the same observable contract.

pub mod catalog;
pub mod kv;
pub mod users;

pub use catalog::{CatalogStore, MemoryCatalog};
pub use kv::{FileKvStore, KvStore, MemoryKvStore};
pub use users::{MemoryUserStore, UserStore};

use thiserror::Error;

/// Failures surfaced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Record not found: {0}")]
  NotFound(String),

  #[error("Insufficient stock: only {available} available")]
  InsufficientStock { available: i64 },

  #[error("Email already registered: {0}")]
  DuplicateEmail(String),

  #[error("Storage backend failure: {source}")]
  Backend {
    #[source]
    source: anyhow::Error,
  },
}

impl From<std::io::Error> for StoreError {
  fn from(err: std::io::Error) -> Self {
    StoreError::Backend { source: err.into() }
  }
}
