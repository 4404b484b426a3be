//! Server module for managing HTTP server lifecycle
//!
//! This module handles bot initialization, startup, and graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::api::middleware::ApiKeyAuth;
use crate::api::routes::create_router;
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::telegram::{Bot, DEFAULT_API_BASE};

/// HTTP server manager
pub struct Server {
    settings: Settings,
    api_base: String,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the bot at another Bot API server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Builds the bot and verifies its identity with the provider
    /// 2. Creates application state
    /// 3. Binds to configured address
    /// 4. Serves until Ctrl+C or SIGTERM, cancelling in-flight dispatches
    ///
    /// # Errors
    /// - [`AppError::BotInit`] / [`AppError::BotIdentity`] when the token is unusable
    /// - [`AppError::Internal`] when binding or serving fails
    pub async fn run(self) -> AppResult<()> {
        tracing::info!(
            version = %crate::pkg_version(),
            address = %self.settings.address,
            recipients = self.settings.recipients.len(),
            auth_enabled = self.settings.auth_enabled(),
            request_timeout = self.settings.request_timeout,
            "Application starting"
        );

        let shutdown = CancellationToken::new();

        let bot = Bot::builder(&self.settings.bot_token)
            .api_base(&self.api_base)
            .build()?;
        let identity = bot
            .get_me(&shutdown)
            .await
            .map_err(AppError::BotIdentity)?;
        tracing::info!(
            bot_id = identity.id,
            username = identity.username.as_deref().unwrap_or_default(),
            "Bot identity verified"
        );

        let state = AppState::new(
            Arc::new(bot),
            self.settings.recipients.clone(),
            shutdown.clone(),
        );
        let router = create_router(
            state,
            ApiKeyAuth::new(&self.settings.api_key),
            Duration::from_secs(self.settings.request_timeout),
        );

        let address = &self.settings.address;
        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("Failed to bind to {address}"))?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await
            .context("HTTP server failed")?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for Ctrl+C or SIGTERM, then cancels `token`.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    token.cancel();
}
