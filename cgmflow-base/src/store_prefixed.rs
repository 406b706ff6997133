use super::{KeyValueStore, StoreError};

/// Wrapper to a [`KeyValueStore`] that namespaces every key with a prefix.
///
/// Lets several flows share one backing store without seeing each other's snapshots.
#[derive(Debug)]
pub struct PrefixedStore<S> {
  prefix: String,
  store: S,
}

impl<S> PrefixedStore<S>
  where S: KeyValueStore
{
  /// Wrap `store`. Only keys under `prefix` are visible.
  pub fn new(store: S, prefix: &str) -> Self {
    Self { prefix: prefix.to_owned(), store }
  }

  fn full_key(&self, key: &str) -> String {
    let mut full_key = String::with_capacity(self.prefix.len() + key.len());
    full_key.push_str(&self.prefix);
    full_key.push_str(key);
    full_key
  }
}

impl<S> KeyValueStore for PrefixedStore<S>
  where S: KeyValueStore
{
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    self.store.get(&self.full_key(key))
  }

  fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    self.store.set(&self.full_key(key), value)
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    self.store.delete(&self.full_key(key))
  }
}


#[cfg(test)]
mod tests {
  use std::sync::Arc;
  use crate::{KeyValueStore, MemoryStore};
  use super::PrefixedStore;

  #[test]
  fn basic() {
    let backing = Arc::new(MemoryStore::new());
    let flow_a = PrefixedStore::new(backing.clone(), "a-");
    let flow_b = PrefixedStore::new(backing.clone(), "b-");

    flow_a.set("state", "from a".to_owned()).unwrap();
    assert_eq!(flow_a.get("state"), Ok(Some("from a".to_owned())));
    assert_eq!(flow_b.get("state"), Ok(None));

    // the backing store holds the full key
    assert_eq!(backing.get("a-state"), Ok(Some("from a".to_owned())));

    flow_b.delete("state").unwrap();
    assert_eq!(flow_a.get("state"), Ok(Some("from a".to_owned())));
  }
}
