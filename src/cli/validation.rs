//! CLI argument validation functions
//!
//! Value parsers used by clap for arguments that need more than type checks.

use crate::config::validation::validate_address;

/// Validate a `host:port` listening address
pub fn validate_listen_address(address: &str) -> Result<String, String> {
    let address = address.trim();
    validate_address(address).map_err(|e| e.to_string())?;
    Ok(address.to_string())
}

/// Validate a single recipient: a chat id or an `@channel` username
pub fn validate_recipient(recipient: &str) -> Result<String, String> {
    let recipient = recipient.trim();

    if recipient.is_empty() {
        return Err("Recipient cannot be empty".to_string());
    }

    if recipient.contains(char::is_whitespace) {
        return Err(format!("Recipient cannot contain spaces, got: '{recipient}'"));
    }

    Ok(recipient.to_string())
}
