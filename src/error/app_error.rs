use thiserror::Error;

use crate::config::ConfigError;
use crate::logger::LoggerError;
use crate::telegram::{BotInitError, NotifyError, ProviderError};

/// Application-wide error type surfaced by CLI commands.
///
/// Each variant maps to a process exit code, see [`AppError::exit_code`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logger could not be installed
    #[error("Logger initialization failed: {0}")]
    Logger(#[from] LoggerError),

    /// Bot client could not be constructed
    #[error("Error initializing the bot: {0}")]
    BotInit(#[from] BotInitError),

    /// Startup identity check against the provider failed
    #[error("Error accessing the telegram API with the provided bot token: {0}")]
    BotIdentity(#[source] ProviderError),

    /// Notification could not be read from input
    #[error("Failed to read the message: {source}")]
    Input {
        #[source]
        source: std::io::Error,
    },

    /// Notification was rejected or failed to deliver
    #[error("Error sending the message: {0}")]
    Send(#[from] NotifyError),

    /// Unexpected runtime failure with context
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal {
            message: format!("{error:#}"),
            source: error,
        }
    }
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// | code | meaning                        |
    /// |------|--------------------------------|
    /// | 1    | generic runtime failure        |
    /// | 2    | configuration error            |
    /// | 3    | bot initialization failure     |
    /// | 4    | send failure                   |
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::Logger(_) => 2,
            AppError::BotInit(_) | AppError::BotIdentity(_) => 3,
            AppError::Input { .. } | AppError::Send(_) => 4,
            AppError::Internal { .. } => 1,
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
