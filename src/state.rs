//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::telegram::Notifier;

/// Application state shared by every handler.
///
/// Cloning is cheap, all members are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Delivery backend
    pub notifier: Arc<dyn Notifier>,
    /// Recipients used when a request does not name its own
    pub recipients: Arc<[String]>,
    /// Cancelled on shutdown, every dispatch runs under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    /// # Example
    /// ```ignore
    /// let bot = Bot::new(&settings.bot_token)?;
    /// let state = AppState::new(Arc::new(bot), settings.recipients.clone(), CancellationToken::new());
    /// ```
    pub fn new(
        notifier: Arc<dyn Notifier>,
        recipients: Vec<String>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            notifier,
            recipients: recipients.into(),
            shutdown,
        }
    }
}
