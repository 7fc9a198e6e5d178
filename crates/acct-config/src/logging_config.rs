use crate::{DEFAULT_LOG_COLORED, DEFAULT_LOG_LEVEL, LogLevel};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub colored: bool,
    /// Log file, relative to the config dir. None = stderr
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(DEFAULT_LOG_LEVEL),
            colored: DEFAULT_LOG_COLORED,
            file: None,
        }
    }
}
