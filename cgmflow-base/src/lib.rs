//! Base components for CgmFlow
//!
//! Holds the ID error shared by the other crates and the persistence collaborator: a small
//! get/set/delete key-value store that flow snapshots are written to.

mod errors;
pub use errors::{IdError, StoreError};

mod store;
pub use store::{ KeyValueStore, MemoryStore };

mod store_prefixed;
pub use store_prefixed::PrefixedStore;

mod store_file;
pub use store_file::FileStore;
