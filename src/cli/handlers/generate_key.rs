//! Generate-key command handler

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Context;
use rand::Rng;

use crate::error::AppResult;

/// Number of random bytes in a generated key.
pub const API_KEY_BYTES: usize = 30;

/// Random API key, 30 bytes rendered as 60 uppercase hex characters.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    rand::rng().fill(&mut bytes[..]);

    bytes
        .iter()
        .fold(String::with_capacity(API_KEY_BYTES * 2), |mut key, byte| {
            let _ = write!(key, "{byte:02X}");
            key
        })
}

/// Handler for the generate-key command
#[derive(Debug, Default)]
pub struct GenerateKeyCommandHandler;

impl GenerateKeyCommandHandler {
    pub fn new() -> Self {
        Self
    }

    /// Print a fresh key followed by a newline.
    pub fn execute(&self, out: &mut impl Write) -> AppResult<()> {
        writeln!(out, "{}", generate_api_key()).context("Failed to write the generated key")?;
        Ok(())
    }
}
