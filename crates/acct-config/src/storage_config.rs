use crate::{
    ConfigError, ConfigErrorResult, CorruptionPolicy, DEFAULT_STORAGE_DIR, DEFAULT_STORAGE_KEY,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the persisted entries, relative to the config dir
    pub dir: String,
    pub key: String,
    pub on_corrupt: CorruptionPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_STORAGE_DIR),
            key: String::from(DEFAULT_STORAGE_KEY),
            on_corrupt: CorruptionPolicy::default(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.dir.trim().is_empty() {
            return Err(ConfigError::storage("storage.dir cannot be empty"));
        }

        if Path::new(&self.dir).is_absolute() || self.dir.contains("..") {
            return Err(ConfigError::storage(
                "storage.dir must be relative and cannot contain '..'",
            ));
        }

        if !is_valid_storage_key(&self.key) {
            return Err(ConfigError::storage(format!(
                "storage.key '{}' must be non-empty, use only [A-Za-z0-9_-.] and not start with '.'",
                self.key
            )));
        }

        Ok(())
    }
}

/// A storage key doubles as a file name, so it is kept to a safe character set.
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
