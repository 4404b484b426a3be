//! In-memory [`Notifier`] for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::error::{NotifyError, ProviderError};
use super::notifier::Notifier;
use super::types::BotIdentity;
use super::validation::validate;

/// Records what it was asked to send and answers with canned outcomes.
///
/// Runs the real validator first, so validation failures behave exactly
/// like the production client.
#[derive(Default)]
pub struct MockNotifier {
    send_error: Option<fn() -> NotifyError>,
    identity_error: Option<fn() -> ProviderError>,
    calls: Mutex<Vec<SentMessage>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub text: String,
    pub parse_mode: String,
    pub recipients: Vec<String>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every dispatch that passes validation with the produced error.
    pub fn failing_with(error: fn() -> NotifyError) -> Self {
        Self {
            send_error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_identity_error(mut self, error: fn() -> ProviderError) -> Self {
        self.identity_error = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<SentMessage> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_message(
        &self,
        cancel: &CancellationToken,
        text: &str,
        parse_mode: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(SentMessage {
                text: text.to_string(),
                parse_mode: parse_mode.to_string(),
                recipients: recipients.to_vec(),
            });
        }

        validate(text, parse_mode, recipients)?;
        if cancel.is_cancelled() {
            return Err(NotifyError::Cancelled);
        }
        match self.send_error {
            Some(error) => Err(error()),
            None => Ok(()),
        }
    }

    async fn get_me(&self, _cancel: &CancellationToken) -> Result<BotIdentity, ProviderError> {
        match self.identity_error {
            Some(error) => Err(error()),
            None => Ok(BotIdentity {
                id: 1,
                is_bot: true,
                first_name: "Test".to_string(),
                username: Some("test_bot".to_string()),
                ..BotIdentity::default()
            }),
        }
    }
}
