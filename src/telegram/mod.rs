//! Telegram delivery: validation, the Bot API client and the fan-out dispatcher.
//!
//! ```ignore
//! let bot = Bot::new(token)?;
//! bot.send_message(&CancellationToken::new(), "*hi*", "MarkdownV2", &recipients).await?;
//! ```

mod client;
mod dispatcher;
pub mod error;
mod notifier;
pub mod types;
mod validation;

#[cfg(test)]
pub mod mock;

pub use client::{Bot, BotBuilder, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
pub use error::{
    ApiError, BotInitError, DeliveryErrors, NotifyError, ProviderError, RecipientFailure,
    ValidationError,
};
pub use notifier::Notifier;
pub use types::{BotIdentity, MAX_MESSAGE_LEN, ParseMode};
pub use validation::validate;
