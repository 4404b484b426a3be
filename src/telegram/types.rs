//! Wire types for the Telegram Bot API and the message model.
//!
//! @see https://core.telegram.org/bots/api#sendmessage
//! @see https://core.telegram.org/bots/api#user

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Absolute maximum length of a message body in bytes.
///
/// Telegram applies a 4096 **character** limit after entity parsing, while
/// formatting markup expands the byte length well past the character count.
/// Bodies shorter than this value may still be rejected by the provider with
/// an `entities too long` error.
pub const MAX_MESSAGE_LEN: usize = 9500;

/// How the provider interprets formatting markup in the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseMode {
    /// No `parse_mode` is sent, the body is plain text.
    #[default]
    Default,
    MarkdownV2,
    Html,
    /// Legacy markdown, kept for backward compatibility by the provider.
    Markdown,
}

impl ParseMode {
    /// Value sent in the `parse_mode` field, `None` for [`ParseMode::Default`].
    pub fn as_api_str(&self) -> Option<&'static str> {
        match self {
            ParseMode::Default => None,
            ParseMode::MarkdownV2 => Some("MarkdownV2"),
            ParseMode::Html => Some("HTML"),
            ParseMode::Markdown => Some("Markdown"),
        }
    }
}

impl FromStr for ParseMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(ParseMode::Default),
            "MarkdownV2" => Ok(ParseMode::MarkdownV2),
            "HTML" => Ok(ParseMode::Html),
            "Markdown" => Ok(ParseMode::Markdown),
            other => Err(ValidationError::ParseModeInvalid(other.to_string())),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str().unwrap_or(""))
    }
}

/// Body of the `sendMessage` call.
#[derive(Debug, Serialize)]
pub(crate) struct SendMessagePayload<'a> {
    /// Unique identifier for the target chat or username of the target channel
    pub chat_id: &'a str,
    /// Text of the message to be sent, 1-4096 characters after entities parsing
    pub text: &'a str,
    /// Mode for parsing entities in the message text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
}

/// Response envelope shared by every Bot API method.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub result: Option<T>,
}

/// Account information returned by `getMe`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BotIdentity {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub added_to_attachment_menu: bool,
    #[serde(default)]
    pub can_join_groups: bool,
    #[serde(default)]
    pub can_read_all_group_messages: bool,
    #[serde(default)]
    pub supports_inline_queries: bool,
}
