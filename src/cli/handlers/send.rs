//! Send command handler
//!
//! Delivers one message from the command line, reading stdin when the
//! message argument is missing or empty.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::logger::init_logger;
use crate::telegram::{Bot, DEFAULT_API_BASE, MAX_MESSAGE_LEN, NotifyError, ValidationError};

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
    message: Option<String>,
    parse_mode: String,
    api_base: String,
}

impl SendCommandHandler {
    pub fn new(config: Settings, message: Option<String>, parse_mode: String) -> Self {
        Self {
            config,
            message,
            parse_mode,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the bot at another Bot API server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Execute the send command, installing the logger first.
    pub async fn execute(self) -> AppResult<()> {
        init_logger(&self.config.to_logger_config())?;
        self.send(tokio::io::stdin(), cancel_on_ctrl_c()).await
    }

    /// Validate, resolve the message and deliver it.
    ///
    /// Validation of the message itself is left to the bot, so an oversized
    /// or empty message surfaces as a send error.
    pub async fn send<R>(self, input: R, cancel: CancellationToken) -> AppResult<()>
    where
        R: AsyncRead + Unpin,
    {
        self.config.require_bot_token()?;
        self.config.require_recipients()?;

        let bot = Bot::builder(&self.config.bot_token)
            .api_base(&self.api_base)
            .build()?;

        let text = match self.message.filter(|message| !message.is_empty()) {
            Some(message) => message,
            None => read_message(input).await?,
        };

        bot.send_message(&cancel, &text, &self.parse_mode, &self.config.recipients)
            .await?;

        tracing::info!(
            recipients = self.config.recipients.len(),
            "Message sent"
        );
        Ok(())
    }
}

/// Read the message from `input`, at most one byte past the length limit.
///
/// Reaching the extra byte is reported as [`ValidationError::MessageTooLong`]
/// before decoding, since the cut may split a multibyte character.
pub async fn read_message<R>(input: R) -> AppResult<String>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    input
        .take((MAX_MESSAGE_LEN + 1) as u64)
        .read_to_end(&mut buf)
        .await
        .map_err(|source| AppError::Input { source })?;

    if buf.len() > MAX_MESSAGE_LEN {
        return Err(NotifyError::Validation(ValidationError::MessageTooLong {
            len: buf.len(),
            max: MAX_MESSAGE_LEN,
        })
        .into());
    }

    String::from_utf8(buf).map_err(|e| AppError::Input {
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })
}

/// Token cancelled on the first Ctrl+C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, cancelling delivery");
            trigger.cancel();
        }
    });
    token
}
