//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::logger::init_logger;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the serve command with optional dry-run support
    ///
    /// # Errors
    /// - Configuration validation errors, including a missing bot token
    /// - Bot initialization or identity check errors (if not dry-run)
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        self.validate_configuration()?;
        init_logger(&self.config.to_logger_config())?;
        Server::new(self.config).run().await
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.validate_configuration()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.address);
        println!("✓ Bot token is configured");
        println!(
            "✓ Default recipients: {}",
            if self.config.recipients.is_empty() {
                "none, requests must provide them".to_string()
            } else {
                self.config.recipients.join(", ")
            }
        );
        println!(
            "✓ API key authentication: {}",
            if self.config.auth_enabled() { "enabled" } else { "disabled" }
        );
        println!(
            "✓ Logging: level {}, format {}",
            self.config.log_level, self.config.log_type
        );

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    fn validate_configuration(&self) -> AppResult<()> {
        self.config.validate()?;
        self.config.require_bot_token()?;
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
