//! Key-value storage the session is mirrored to.

mod error;
mod file_storage;
mod memory_storage;

pub use error::{Result as StorageResult, StorageError};
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Minimal string key-value API, modelled on browser local storage.
///
/// Implementations must treat removing a missing key as success.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Moves the entry under `key` aside so it no longer loads.
    ///
    /// Returns where it went, or `None` if there was nothing to move.
    fn quarantine(&self, key: &str) -> StorageResult<Option<String>>;
}

#[track_caller]
pub(crate) fn ensure_valid_key(key: &str) -> StorageResult<()> {
    if acct_config::is_valid_storage_key(key) {
        Ok(())
    } else {
        Err(StorageError::invalid_key(key))
    }
}
