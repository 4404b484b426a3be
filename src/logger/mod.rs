//! Logger Module
//!
//! A console logger based on `tracing-subscriber` with text or JSON output.
//! `RUST_LOG` takes precedence over the configured level when set, unless the
//! level was pinned on the command line.

pub mod config;
pub mod error;

// Re-export main types
pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger with the given configuration
pub fn init_logger(config: &LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = build_filter(config);

    match config.format {
        LogFormat::Text => {
            let use_ansi = std::io::stdout().is_terminal();
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_ansi(use_ansi)
                        .with_target(true)
                        .with_level(true),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).json())
                .try_init()?;
        }
    }

    Ok(())
}

fn build_filter(config: &LoggerConfig) -> EnvFilter {
    let configured = || EnvFilter::new(config.level.to_lowercase());
    if config.ignore_env {
        return configured();
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| configured())
}
