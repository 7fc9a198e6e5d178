use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{category} error: {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Home directory not found")]
    NoHomeDir,
}

impl ConfigError {
    /// Create a storage error
    #[track_caller]
    pub fn storage<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Storage",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a logging error
    #[track_caller]
    pub fn logging<S: Into<String>>(message: S) -> Self {
        ConfigError::Generic {
            category: "Logging",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
