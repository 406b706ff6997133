use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use super::{KeyValueStore, StoreError};

/// [`KeyValueStore`] keeping one `<key>.json` file per key inside a directory.
///
/// Keys are limited to ASCII letters, digits, `-` and `_` so a key can never leave the directory.
#[derive(Debug)]
pub struct FileStore {
  dir: PathBuf,
  lock: RwLock<()>,
}

impl FileStore {
  /// Open a store rooted at `dir`, creating the directory if needed
  pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
    std::fs::create_dir_all(dir.as_ref())?;
    Ok(Self {
      dir: dir.as_ref().to_path_buf(),
      lock: RwLock::new(()),
    })
  }

  fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
    let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
      return Err(StoreError::InvalidKey(key.to_owned()));
    }
    Ok(self.dir.join(format!("{}.json", key)))
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let path = self.path_for(key)?;
    let _guard = self.lock.read().map_err(|_e| StoreError::Poisoned)?;
    match std::fs::read_to_string(path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    let path = self.path_for(key)?;
    let _guard = self.lock.write().map_err(|_e| StoreError::Poisoned)?;

    // write aside then rename so readers never see a half-written snapshot
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, value)?;
    std::fs::rename(tmp_path, path)?;
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    let path = self.path_for(key)?;
    let _guard = self.lock.write().map_err(|_e| StoreError::Poisoned)?;
    match std::fs::remove_file(path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}
