//! Key-value storage for the persisted recipe collection.
//!
//! The store never touches the filesystem directly; it reads and overwrites a
//! single slot through [`KeyValueStorage`].

mod disk;
mod memory;

pub use disk::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// A synchronous string key-value store.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys double as file names, so only a conservative character set is accepted.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 200
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
