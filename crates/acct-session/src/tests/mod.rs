//! Unit tests for the session crate.
//!
//! These tests can access crate internals via `use crate::`.

mod store;

use crate::storage::{KeyValueStorage, MemoryStorage, StorageError, StorageResult};

use std::sync::atomic::{AtomicBool, Ordering};

/// Wraps a [`MemoryStorage`] and fails writes on demand.
#[derive(Debug, Default)]
pub(crate) struct FlakyStorage {
    pub(crate) inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FlakyStorage {
    pub(crate) fn new(inner: MemoryStorage) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
        }
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self, key: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::file_write(
                key.into(),
                std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            ))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check(key)?;
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.check(key)?;
        self.inner.remove_item(key)
    }

    fn quarantine(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.quarantine(key)
    }
}
