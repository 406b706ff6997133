use std::collections::HashMap;
use std::sync::RwLock;
use super::StoreError;

/// The persistence collaborator: a flat store of serialized blobs addressed by key.
///
/// Stores are shared between callers so every operation takes `&self`; implementations handle their own locking.
///
/// # Examples
/// ```
/// # use cgmflow_base::{KeyValueStore, MemoryStore};
/// let store = MemoryStore::new();
/// store.set("cgm-flow-state", "{}".to_owned()).unwrap();
/// assert_eq!(store.get("cgm-flow-state").unwrap(), Some("{}".to_owned()));
///
/// store.delete("cgm-flow-state").unwrap();
/// assert_eq!(store.get("cgm-flow-state").unwrap(), None);
/// ```
pub trait KeyValueStore: std::fmt::Debug + Send + Sync {
  /// Get the blob stored at `key`, `None` if nothing is stored there
  fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

  /// Store `value` at `key`, replacing what was there
  fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

  /// Remove `key`. Removing a missing key is not an error.
  fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process [`KeyValueStore`]. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
  data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
  /// Create a new, empty MemoryStore
  pub fn new() -> Self {
    Self::with_capacity(0)
  }

  /// Create a new MemoryStore with initial capacity
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      data: RwLock::new(HashMap::with_capacity(capacity)),
    }
  }

  pub fn len(&self) -> usize {
    self.data.read().map(|data| data.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let data = self.data.read().map_err(|_e| StoreError::Poisoned)?;
    Ok(data.get(key).cloned())
  }

  fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    let mut data = self.data.write().map_err(|_e| StoreError::Poisoned)?;
    data.insert(key.to_owned(), value);
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    let mut data = self.data.write().map_err(|_e| StoreError::Poisoned)?;
    data.remove(key);
    Ok(())
  }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    self.as_ref().get(key)
  }

  fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    self.as_ref().set(key, value)
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    self.as_ref().delete(key)
  }
}
