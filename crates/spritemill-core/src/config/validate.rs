//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.binary.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "engine.binary must not be empty".into(),
            ));
        }
        if self.engine.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "engine.timeout_ms must be > 0".into(),
            ));
        }
        if self.normalize.target_ms == 0 {
            return Err(ConfigError::ValidationError(
                "normalize.target_ms must be > 0".into(),
            ));
        }
        if !matches!(
            self.logging.level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of trace/debug/info/warn/error, got `{}`",
                self.logging.level
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be pretty or json, got `{}`",
                self.logging.format
            )));
        }
        Ok(())
    }
}
