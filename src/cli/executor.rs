//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing.

use std::io;

use super::handlers::{
    GenerateKeyCommandHandler, SendCommandHandler, ServeCommandHandler, VersionCommandHandler,
};
use super::load_and_merge_config;
use super::parser::{Cli, Commands};
use crate::config::ConfigLoader;
use crate::error::AppResult;

/// Execute a CLI command
///
/// `generate-key` and `version` run without loading configuration. Every
/// other command loads and merges it first; no command means `serve`.
///
/// # Errors
/// Returns errors from configuration loading or from the command handlers
pub async fn execute_command(cli: &Cli) -> AppResult<()> {
    match &cli.command {
        Some(Commands::GenerateKey) => GenerateKeyCommandHandler::new().execute(&mut io::stdout()),
        Some(Commands::Version) => {
            VersionCommandHandler::new(ConfigLoader::new(cli.config.clone()))
                .execute(&mut io::stdout())
        }
        Some(Commands::Send {
            parse_mode,
            message,
            ..
        }) => {
            let settings = load_and_merge_config(cli)?;
            SendCommandHandler::new(
                settings,
                message.clone(),
                parse_mode.clone().unwrap_or_default(),
            )
            .execute()
            .await
        }
        Some(Commands::Serve { dry_run, .. }) => {
            let settings = load_and_merge_config(cli)?;
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => {
            let settings = load_and_merge_config(cli)?;
            ServeCommandHandler::new(settings).execute(false).await
        }
    }
}
