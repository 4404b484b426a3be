//! Settings consumed by the server and the CLI.
//!
//! Every field can come from the YAML config file, the matching `BOT_*`
//! environment variable or a command line flag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::logger::{LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

pub(crate) fn default_address() -> String {
    "localhost:6000".to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_log_type() -> String {
    "text".to_string()
}

pub(crate) fn default_request_timeout() -> u64 {
    30
}

// ============================================================================
// Settings
// ============================================================================

/// Root configuration.
///
/// `Debug` never prints the bot token or the API key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Bot token as given by BotFather
    #[serde(default)]
    pub bot_token: String,

    /// Default chat ids or `@channel` usernames
    #[serde(default)]
    pub recipients: Vec<String>,

    /// HTTP listening address, `host:port`
    #[serde(default = "default_address")]
    pub address: String,

    /// Shared secret for the HTTP API, empty disables authentication
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `text` or `json`
    #[serde(default = "default_log_type")]
    pub log_type: String,

    /// Per-request budget of the HTTP server, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Set by `--verbose` / `--quiet`, the level then also beats `RUST_LOG`
    #[serde(skip)]
    pub log_level_pinned: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            recipients: Vec::new(),
            address: default_address(),
            api_key: String::new(),
            log_level: default_log_level(),
            log_type: default_log_type(),
            request_timeout: default_request_timeout(),
            log_level_pinned: false,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "" } else { "<redacted>" }
        }

        f.debug_struct("Settings")
            .field("bot_token", &redact(&self.bot_token))
            .field("recipients", &self.recipients)
            .field("address", &self.address)
            .field("api_key", &redact(&self.api_key))
            .field("log_level", &self.log_level)
            .field("log_type", &self.log_type)
            .field("request_timeout", &self.request_timeout)
            .field("log_level_pinned", &self.log_level_pinned)
            .finish()
    }
}

impl Settings {
    /// Logger configuration derived from `log_level` and `log_type`.
    ///
    /// Unknown formats fall back to text, `validate()` rejects them earlier.
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.log_level.clone(),
            format: self.log_type.parse().unwrap_or(LogFormat::Text),
            ignore_env: self.log_level_pinned,
        }
    }

    /// Whether the HTTP API requires an API key.
    pub fn auth_enabled(&self) -> bool {
        !self.api_key.is_empty()
    }
}
