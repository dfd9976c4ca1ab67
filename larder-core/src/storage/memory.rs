use std::collections::HashMap;
use std::sync::RwLock;

use super::{validate_key, KeyValueStorage};
use crate::error::StorageError;

/// In-process storage, used by tests and `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage with one slot already populated.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.write() {
            slots.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let slots = self
            .slots
            .read()
            .map_err(|_| StorageError::Io(std::io::Error::other("storage lock poisoned")))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::Io(std::io::Error::other("storage lock poisoned")))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::Io(std::io::Error::other("storage lock poisoned")))?;
        slots.remove(key);
        Ok(())
    }
}
