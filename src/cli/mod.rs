//! CLI module for tg-notifier
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (config file + environment + CLI args)
//! - Command execution and validation
//! - Command handlers for serve, send, generate-key and version

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

// Re-export public types for convenience
pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{BotArgs, Cli, Commands, LogLevel, LogType};

use crate::config::settings::Settings;
use crate::error::AppResult;

/// Load and merge configuration from CLI arguments
///
/// This function handles the complete configuration loading process:
/// 1. Load base configuration from the YAML file, if any
/// 2. Merge environment and CLI argument overrides
/// 3. Validate the final configuration
///
/// # Errors
/// Returns error if configuration loading, merging, or validation fails
pub fn load_and_merge_config(cli: &Cli) -> AppResult<Settings> {
    let merger = ConfigurationMerger::from_config_path(cli.config.as_ref())?;
    Ok(merger.merge_cli_args(cli)?)
}
