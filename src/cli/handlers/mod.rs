//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod generate_key;
pub mod send;
pub mod serve;
pub mod version;

pub use generate_key::GenerateKeyCommandHandler;
pub use send::SendCommandHandler;
pub use serve::ServeCommandHandler;
pub use version::VersionCommandHandler;
