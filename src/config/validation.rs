//! Configuration validation logic

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Valid log levels
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log output types
pub const VALID_LOG_TYPES: &[&str] = &["text", "json"];

impl Settings {
    /// Validate fields that have a constrained format.
    ///
    /// # Validation Rules
    /// - Log level must be one of trace, debug, info, warn, error
    /// - Log type must be text or json
    /// - Address must be `host:port` with a numeric port
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.log_level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::validation(
                "log_level".to_string(),
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.log_level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        let log_type = self.log_type.to_lowercase();
        if !VALID_LOG_TYPES.contains(&log_type.as_str()) {
            return Err(ConfigError::validation(
                "log_type".to_string(),
                format!(
                    "Invalid log type '{}'. Valid types are: {}",
                    self.log_type,
                    VALID_LOG_TYPES.join(", ")
                ),
            ));
        }

        validate_address(&self.address)?;

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    /// Fail unless a bot token was provided by any source.
    pub fn require_bot_token(&self) -> Result<(), ConfigError> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::validation(
                "bot_token",
                "Bot token must be provided through the CLI, the config file or $BOT_TOKEN.",
            ));
        }
        Ok(())
    }

    /// Fail unless at least one default recipient is configured.
    pub fn require_recipients(&self) -> Result<(), ConfigError> {
        if self.recipients.is_empty() {
            return Err(ConfigError::validation(
                "recipients",
                "Recipients list must be provided through the CLI, the config file or $BOT_RECIPIENTS.",
            ));
        }
        Ok(())
    }
}

/// Check that an address looks like `host:port`.
///
/// The host may be empty (listen on every interface).
pub fn validate_address(address: &str) -> Result<(), ConfigError> {
    let invalid = || {
        ConfigError::validation(
            "address".to_string(),
            format!("Invalid listening address '{address}', expected host:port"),
        )
    };

    let (_, port) = address.rsplit_once(':').ok_or_else(invalid)?;
    match port.parse::<u16>() {
        Ok(port) if port > 0 => Ok(()),
        _ => Err(invalid()),
    }
}
