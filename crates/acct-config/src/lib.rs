mod config;
mod corruption_policy;
mod error;
mod log_level;
mod logging_config;
mod storage_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use corruption_policy::CorruptionPolicy;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use storage_config::{StorageConfig, is_valid_storage_key};

/// Key the current user is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "user";

const CONFIG_DIR_ENV: &str = "ACCT_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = ".acct";
const CONFIG_FILENAME: &str = "config.toml";
const DEFAULT_STORAGE_DIR: &str = "session";
const DEFAULT_LOG_LEVEL_STRING: &str = "warn";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;
const DEFAULT_LOG_COLORED: bool = true;
