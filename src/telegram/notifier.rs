//! Abstraction over the delivery backend used by the HTTP layer.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::client::Bot;
use super::error::{NotifyError, ProviderError};
use super::types::BotIdentity;

/// Anything able to fan out a notification and report its own identity.
///
/// Uses `async_trait` so handlers can hold an `Arc<dyn Notifier>`.
///
/// # Example Implementation
/// ```ignore
/// struct Discard;
///
/// #[async_trait]
/// impl Notifier for Discard {
///     async fn send_message(&self, _: &CancellationToken, _: &str, _: &str, _: &[String])
///         -> Result<(), NotifyError> { Ok(()) }
///
///     async fn get_me(&self, _: &CancellationToken) -> Result<BotIdentity, ProviderError> {
///         Ok(BotIdentity::default())
///     }
/// }
/// ```
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Validate and deliver `text` to every recipient.
    async fn send_message(
        &self,
        cancel: &CancellationToken,
        text: &str,
        parse_mode: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError>;

    /// Identity of the account behind the configured credentials.
    async fn get_me(&self, cancel: &CancellationToken) -> Result<BotIdentity, ProviderError>;
}

#[async_trait]
impl Notifier for Bot {
    async fn send_message(
        &self,
        cancel: &CancellationToken,
        text: &str,
        parse_mode: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError> {
        Bot::send_message(self, cancel, text, parse_mode, recipients).await
    }

    async fn get_me(&self, cancel: &CancellationToken) -> Result<BotIdentity, ProviderError> {
        Bot::get_me(self, cancel).await
    }
}
