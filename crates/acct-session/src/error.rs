use crate::storage::StorageError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors related to the user session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Persisted session under '{key}' is corrupted: {message} {location}")]
    Corrupted {
        key: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to serialize session: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("No SessionProvider in scope {location}")]
    NoProvider { location: ErrorLocation },
}

impl SessionError {
    /// Whether this error is recoverable via retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::Corrupted { .. } | Self::Serialization { .. } | Self::NoProvider { .. } => false,
        }
    }

    /// User-friendly recovery hint.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.recovery_hint(),
            Self::Corrupted { .. } => {
                "The saved session is unreadable. \
                   Set storage.on_corrupt = \"discard\" to back it up and start fresh."
            }
            Self::Serialization { .. } => {
                "Internal error preparing session data. \
                   Please report this issue."
            }
            Self::NoProvider { .. } => {
                "The session was looked up outside of SessionProvider::scope. \
                   Wrap the caller in a provider or pass the handle explicitly."
            }
        }
    }

    /// Creates Corrupted error at caller location.
    #[track_caller]
    pub fn corrupted(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupted {
            key: key.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates NoProvider error at caller location.
    #[track_caller]
    pub fn no_provider() -> Self {
        Self::NoProvider {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
