use crate::storage::{KeyValueStorage, StorageResult, ensure_valid_key};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const QUARANTINE_SUFFIX: &str = "corrupted";

/// In-process storage. Clones share the same map, so a second store opened
/// over a clone behaves like a restart against the same disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        ensure_valid_key(key)?;
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        ensure_valid_key(key)?;
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        ensure_valid_key(key)?;
        self.items().remove(key);
        Ok(())
    }

    /// Moves the value to `<key>.corrupted`, replacing any earlier backup.
    fn quarantine(&self, key: &str) -> StorageResult<Option<String>> {
        ensure_valid_key(key)?;
        let mut items = self.items();

        let Some(value) = items.remove(key) else {
            return Ok(None);
        };

        let backup_key = format!("{key}.{QUARANTINE_SUFFIX}");
        items.insert(backup_key.clone(), value);
        Ok(Some(backup_key))
    }
}
