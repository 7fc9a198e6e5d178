use crate::storage::{KeyValueStorage, StorageError, StorageResult, ensure_valid_key};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
const FILE_EXTENSION: &str = "json";

/// One JSON file per key inside a directory.
///
/// Writes go through a temp file, fsync and rename, so a crash mid-write
/// leaves either the old or the new value on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[track_caller]
    pub fn item_path(&self, key: &str) -> StorageResult<PathBuf> {
        ensure_valid_key(key)?;
        Ok(self.dir.join(format!("{key}.{FILE_EXTENSION}")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.item_path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No file for key '{key}' at {path:?}");
                Ok(None)
            }
            Err(e) => Err(StorageError::file_read(path, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let final_path = self.item_path(key)?;

        fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::dir_creation(self.dir.clone(), e))?;

        let temp_path = self.dir.join(format!(
            "{key}.{FILE_EXTENSION}.tmp.{}",
            std::process::id()
        ));

        // Write to temp file with explicit sync
        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.write_all(value.as_bytes())
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            // Clean up temp file on failure
            let _ = fs::remove_file(&temp_path);
            StorageError::atomic_rename(temp_path, final_path.clone(), e)
        })?;

        debug!("Wrote key '{key}' to {final_path:?}");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let path = self.item_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed {path:?}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::remove(path, e)),
        }
    }

    /// Renames `<key>.json` to `<key>.json.corrupted.{timestamp}`. An existing
    /// backup with the same name is never replaced; a counter is appended.
    fn quarantine(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.item_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let timestamp = chrono::Utc::now().format(DATE_FORMAT).to_string();
        let base = format!("{key}.{FILE_EXTENSION}.corrupted.{timestamp}");
        let mut backup_path = self.dir.join(&base);
        let mut attempt = 1u32;
        while backup_path.exists() {
            backup_path = self.dir.join(format!("{base}-{attempt}"));
            attempt += 1;
        }

        fs::rename(&path, &backup_path)
            .map_err(|e| StorageError::backup_failed(path.clone(), e))?;

        warn!("Backed up corrupted entry to {backup_path:?}");
        Ok(Some(backup_path.display().to_string()))
    }
}
