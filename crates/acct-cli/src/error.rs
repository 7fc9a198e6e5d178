use acct_config::ConfigError;
use acct_session::SessionError;
use error_location::ErrorLocation;
use std::panic::Location;
use thiserror::Error;

/// Errors surfaced by the `acct` binary
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to render output: {source} {location}")]
    Output {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl CliError {
    /// Create a logger error with location
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        CliError::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(source: serde_json::Error) -> Self {
        CliError::Output {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// User-friendly recovery hint.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            CliError::Config(_) => {
                "Check config.toml in the config directory and any ACCT_* environment variables."
            }
            CliError::Session(e) => e.recovery_hint(),
            CliError::Logger { .. } => {
                "Check that logging.file points to a writable location."
            }
            CliError::Output { .. } => "Internal error rendering output. Please report this issue.",
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
