use crate::DEFAULT_LOG_LEVEL_STRING;

use std::convert::Infallible;
use std::ops::Deref;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Deserializer};

/// Wrapper for LevelFilter with custom deserialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)
            .unwrap_or_else(|_| String::from(DEFAULT_LOG_LEVEL_STRING));

        Ok(LogLevel::from_str(&s).unwrap_or_else(|never| match never {}))
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

impl Deref for LogLevel {
    type Target = LevelFilter;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl LogLevel {
    /// Known level names only, case-insensitive.
    pub fn from_name(s: &str) -> Option<Self> {
        let level = match s.trim().to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => return None,
        };
        Some(LogLevel(level))
    }
}

impl FromStr for LogLevel {
    type Err = Infallible;

    /// Unknown names fall back to the default level instead of failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s).unwrap_or(LogLevel(crate::DEFAULT_LOG_LEVEL)))
    }
}
