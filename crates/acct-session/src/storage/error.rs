use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory at {path}: {source} {location}")]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to read {path}: {source} {location}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to write {path}: {source} {location}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Atomic rename failed from {from} to {to}: {source} {location}")]
    AtomicRename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to remove {path}: {source} {location}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to backup corrupted file {path}: {source} {location}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Invalid storage key '{key}' {location}")]
    InvalidKey {
        key: String,
        location: ErrorLocation,
    },
}

impl StorageError {
    /// Whether this error is recoverable via retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. }
                | Self::FileWrite { .. }
                | Self::AtomicRename { .. }
                | Self::Remove { .. }
        )
    }

    /// User-friendly recovery hint.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::DirCreation { .. } | Self::FileWrite { .. } => {
                "Unable to write to the session directory. \
                   Check disk space and file permissions."
            }
            Self::FileRead { .. } => {
                "Unable to read the session file. \
                   The file may be locked by another process."
            }
            Self::AtomicRename { .. } => {
                "Unable to save the session file safely. \
                   Check disk space and try again."
            }
            Self::Remove { .. } => {
                "Unable to remove the session file. \
                   Check file permissions in the session directory."
            }
            Self::BackupFailed { .. } => {
                "Unable to backup corrupted file. \
                   Check file permissions in the session directory."
            }
            Self::InvalidKey { .. } => {
                "Storage keys may only use letters, digits, '_', '-' and '.'. \
                   Fix storage.key in config.toml."
            }
        }
    }

    /// Creates DirCreation error at caller location.
    #[track_caller]
    pub fn dir_creation(path: PathBuf, source: std::io::Error) -> Self {
        Self::DirCreation {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates FileRead error at caller location.
    #[track_caller]
    pub fn file_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileRead {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates FileWrite error at caller location.
    #[track_caller]
    pub fn file_write(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileWrite {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates AtomicRename error at caller location.
    #[track_caller]
    pub fn atomic_rename(from: PathBuf, to: PathBuf, source: std::io::Error) -> Self {
        Self::AtomicRename {
            from,
            to,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Remove error at caller location.
    #[track_caller]
    pub fn remove(path: PathBuf, source: std::io::Error) -> Self {
        Self::Remove {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates BackupFailed error at caller location.
    #[track_caller]
    pub fn backup_failed(path: PathBuf, source: std::io::Error) -> Self {
        Self::BackupFailed {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidKey error at caller location.
    #[track_caller]
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
