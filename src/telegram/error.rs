//! Error taxonomy of the Telegram delivery layer.

use std::fmt;

use thiserror::Error;

/// Rejection of a notification before any provider call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message is empty")]
    MessageEmpty,

    #[error("message is too long: {len} bytes, at most {max} are allowed")]
    MessageTooLong { len: usize, max: usize },

    #[error("invalid parse mode value '{0}', expected one of: MarkdownV2, HTML, Markdown")]
    ParseModeInvalid(String),

    #[error("empty recipients list")]
    RecipientsEmpty,
}

/// Error reported by the provider itself (`ok == false` in the envelope).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error during the telegram API call to '{method}' ({code}): {description}")]
pub struct ApiError {
    /// Provider error code, falls back to the HTTP status when absent
    pub code: i64,
    /// Bot API method name, e.g. `sendMessage`
    pub method: String,
    /// Human readable description from the provider
    pub description: String,
}

/// Failure of a single provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure. The URL is stripped so the bot token never leaks.
    #[error("error sending request to the telegram API: {0}")]
    Network(#[source] reqwest::Error),

    #[error("error decoding the telegram API response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("the token does not belong to a bot")]
    NotABot,

    #[error("request cancelled")]
    Cancelled,
}

impl ProviderError {
    pub fn is_api(&self) -> bool {
        matches!(self, ProviderError::Api(_))
    }
}

/// Error building a [`Bot`](super::Bot).
#[derive(Debug, Error)]
pub enum BotInitError {
    #[error("bot token must not be empty")]
    EmptyToken,

    #[error("invalid API base URL '{url}': {message}")]
    InvalidApiBase { url: String, message: String },

    #[error("failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// One failed delivery inside a fan-out.
#[derive(Debug, Error)]
#[error("{recipient}: {error}")]
pub struct RecipientFailure {
    pub recipient: String,
    #[source]
    pub error: ProviderError,
}

/// Every per-recipient failure of a single dispatch.
///
/// Never empty when returned inside [`NotifyError::Delivery`].
#[derive(Debug, Default)]
pub struct DeliveryErrors {
    failures: Vec<RecipientFailure>,
}

impl DeliveryErrors {
    pub fn new(failures: Vec<RecipientFailure>) -> Self {
        Self { failures }
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipientFailure> {
        self.failures.iter()
    }

    /// True if at least one failure came from the provider rejecting the call.
    pub fn has_api_error(&self) -> bool {
        self.failures.iter().any(|f| f.error.is_api())
    }

    pub fn into_inner(self) -> Vec<RecipientFailure> {
        self.failures
    }
}

impl fmt::Display for DeliveryErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, failure) in self.failures.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for DeliveryErrors {}

/// Outcome of a failed `send_message`.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Cancellation observed before any delivery was attempted.
    #[error("notification cancelled before dispatch")]
    Cancelled,

    #[error(transparent)]
    Delivery(DeliveryErrors),
}

impl NotifyError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            NotifyError::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub fn delivery(&self) -> Option<&DeliveryErrors> {
        match self {
            NotifyError::Delivery(errors) => Some(errors),
            _ => None,
        }
    }
}
