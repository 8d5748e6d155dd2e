//! Configuration validation logic

use crate::config::error::ConfigError;
use crate::config::settings::{
    BroadcastDriver, BroadcastingConfig, FileSettings, LoggerSettings, RedisBroadcastConfig,
    Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Largest capacity `tokio::sync::broadcast` accepts
pub const MAX_MEMORY_CAPACITY: usize = usize::MAX >> 1;

const VALID_REDIS_SCHEMES: &[&str] = &["redis://", "rediss://", "redis+unix://", "unix://"];

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        self.file.validate()
    }
}

impl RedisBroadcastConfig {
    /// Validate redis settings
    ///
    /// # Validation Rules
    /// - URL must not be empty and must use a redis scheme
    /// - Pool size must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::validation(
                "broadcasting.redis.url",
                "Redis URL is required when the redis driver is selected.",
            ));
        }

        if !VALID_REDIS_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "broadcasting.redis.url",
                format!(
                    "Invalid redis URL '{}'. Expected one of: {}",
                    self.url,
                    VALID_REDIS_SCHEMES.join(", ")
                ),
            ));
        }

        if self.pool_size == 0 {
            return Err(ConfigError::validation(
                "broadcasting.redis.pool_size",
                "Pool size must be greater than 0.",
            ));
        }

        Ok(())
    }
}

impl BroadcastingConfig {
    /// Validate broadcasting settings
    ///
    /// Redis settings are only checked when the redis driver is selected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_capacity == 0 {
            return Err(ConfigError::validation(
                "broadcasting.memory_capacity",
                "Memory capacity must be greater than 0.",
            ));
        }

        if self.memory_capacity > MAX_MEMORY_CAPACITY {
            return Err(ConfigError::validation(
                "broadcasting.memory_capacity",
                format!("Memory capacity must not exceed {MAX_MEMORY_CAPACITY}."),
            ));
        }

        if self.driver == BroadcastDriver::Redis {
            self.redis.validate()?;
        }

        Ok(())
    }
}

impl Settings {
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.broadcasting.validate()?;
        Ok(())
    }
}
