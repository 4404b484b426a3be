//! Input checks performed before any provider call.

use super::error::ValidationError;
use super::types::{MAX_MESSAGE_LEN, ParseMode};

/// Validate a notification and resolve its parse mode.
///
/// Checks run in a fixed order and the first failure wins:
/// empty body, body length, parse mode, recipients.
pub fn validate(
    text: &str,
    parse_mode: &str,
    recipients: &[String],
) -> Result<ParseMode, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::MessageEmpty);
    }
    if text.len() > MAX_MESSAGE_LEN {
        return Err(ValidationError::MessageTooLong {
            len: text.len(),
            max: MAX_MESSAGE_LEN,
        });
    }
    let mode = parse_mode.parse::<ParseMode>()?;
    if recipients.is_empty() {
        return Err(ValidationError::RecipientsEmpty);
    }
    Ok(mode)
}
