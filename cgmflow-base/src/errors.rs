#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub enum IdError<TID> {
  CannotParse(String),
  IdUnexpected(TID),
}

impl<TID: std::fmt::Display> std::fmt::Display for IdError<TID> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      IdError::CannotParse(s) => write!(f, "cannot parse id '{}'", s),
      IdError::IdUnexpected(id) => write!(f, "id '{}' is not expected here", id),
    }
  }
}

impl<TID: std::fmt::Debug + std::fmt::Display> std::error::Error for IdError<TID> {}


/// Failure of a [`KeyValueStore`](crate::KeyValueStore) operation
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub enum StoreError {
  /// Key contains characters the store cannot hold
  InvalidKey(String),
  /// Underlying I/O failed. Holds the rendered `std::io::Error`
  Io(String),
  /// A writer panicked while holding the store lock
  Poisoned,
}

impl std::error::Error for StoreError {}

impl std::fmt::Display for StoreError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StoreError::InvalidKey(key) => write!(f, "invalid store key '{}'", key),
      StoreError::Io(msg) => write!(f, "store i/o failed: {}", msg),
      StoreError::Poisoned => write!(f, "store lock poisoned"),
    }
  }
}

impl From<std::io::Error> for StoreError {
  fn from(err: std::io::Error) -> Self {
    StoreError::Io(err.to_string())
  }
}
