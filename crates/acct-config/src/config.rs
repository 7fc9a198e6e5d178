use crate::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILENAME, ConfigError, ConfigErrorResult, LogLevel,
    LoggingConfig, StorageConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,

    /// Directory the config was loaded from; relative paths resolve against it
    #[serde(skip)]
    config_dir: PathBuf,
}

impl Config {
    /// Load config from the default config directory.
    ///
    /// Loading order:
    /// 1. Check for ACCT_CONFIG_DIR env var, else use ~/.acct/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply ACCT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        Self::load_from(Self::config_dir()?)
    }

    /// Same as [`Config::load`] but with an explicit config directory.
    pub fn load_from(config_dir: impl Into<PathBuf>) -> ConfigErrorResult<Self> {
        let config_dir = config_dir.into();

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.config_dir = config_dir;
        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config directory.
    /// Priority: ACCT_CONFIG_DIR env var > ~/.acct/
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR_NAME))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Directory this config was loaded from.
    pub fn dir(&self) -> &Path {
        &self.config_dir
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.storage.validate()?;

        if let Some(file) = &self.logging.file {
            if file.trim().is_empty() {
                return Err(ConfigError::logging("logging.file cannot be empty"));
            }

            if Path::new(file).is_absolute() || file.contains("..") {
                return Err(ConfigError::logging(
                    "logging.file must be relative and cannot contain '..'",
                ));
            }
        }

        Ok(())
    }

    /// Absolute path of the session storage directory.
    pub fn storage_path(&self) -> PathBuf {
        self.config_dir.join(&self.storage.dir)
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.logging
            .file
            .as_ref()
            .map(|file| self.config_dir.join(file))
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded from {}:", self.config_dir.display());
        info!(
            "  storage: {} (key '{}', on_corrupt={})",
            self.storage_path().display(),
            self.storage.key,
            self.storage.on_corrupt
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stderr")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Storage
        Self::apply_env_string("ACCT_STORAGE_DIR", &mut self.storage.dir);
        Self::apply_env_string("ACCT_STORAGE_KEY", &mut self.storage.key);
        Self::apply_env_parse("ACCT_STORAGE_ON_CORRUPT", &mut self.storage.on_corrupt);

        // Logging
        Self::apply_env_log_level("ACCT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ACCT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("ACCT_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values
    /// ("true"/"1" or "false"/"0"; anything else is ignored)
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            match val.trim() {
                "true" | "1" => *target = true,
                "false" | "0" => *target = false,
                _ => {}
            }
        }
    }

    /// Helper: Apply environment variable override for the log level.
    /// Unknown level names are ignored rather than reset to the default.
    fn apply_env_log_level(var_name: &str, target: &mut LogLevel) {
        if let Ok(val) = std::env::var(var_name)
            && let Some(level) = LogLevel::from_name(&val)
        {
            *target = level;
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
