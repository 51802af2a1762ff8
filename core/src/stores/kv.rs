// core/src/stores/kv.rs

//! Durable key-value persistence for per-user cart records.
//!
//! Keys are derived deterministically from the bound identity
//! (`"cart_" + user_id`) so no key is shared across identities. Values are
//! opaque strings; the cart controller stores JSON.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::StoreError;

/// Synchronous, local key-value storage.
pub trait KvStore: Send + Sync {
  /// The stored value for `key`, or `None` if absent.
  fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
  fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
  /// Removes `key`. Deleting an absent key is not an error.
  fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, primarily for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
  entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored keys. Handy for asserting record lifecycle in tests.
  pub fn len(&self) -> usize {
    self.entries.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.read().is_empty()
  }
}

impl KvStore for MemoryKvStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.entries.read().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    self.entries.write().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    self.entries.write().remove(key);
    Ok(())
  }
}

/// File-per-key store under a root directory.
///
/// Keys must be plain identifiers (the controller's `cart_<uuid>` keys
/// are); they map to `<root>/<key>.json`.
#[derive(Debug)]
pub struct FileKvStore {
  root: PathBuf,
}

impl FileKvStore {
  /// Opens (and creates if needed) the store directory.
  pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
    let root = root.as_ref().to_path_buf();
    fs::create_dir_all(&root)?;
    Ok(Self { root })
  }

  fn entry_path(&self, key: &str) -> PathBuf {
    self.root.join(format!("{key}.json"))
  }
}

impl KvStore for FileKvStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(self.entry_path(key)) {
      Ok(value) => Ok(Some(value)),
      Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
      Err(err) => Err(err.into()),
    }
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    fs::write(self.entry_path(key), value)?;
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    match fs::remove_file(self.entry_path(key)) {
      Ok(()) => Ok(()),
      Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
      Err(err) => Err(err.into()),
    }
  }
}
