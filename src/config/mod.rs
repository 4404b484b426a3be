//! Configuration management module for tg-notifier
//!
//! # Configuration Priority (lowest to highest)
//! 1. Built-in defaults
//! 2. YAML file: `--config`/`$BOT_CONFIG_PATH`, else
//!    `${XDG_CONFIG_HOME}/tgnotifier/config.yml`, else `/etc/tgnotifier.yml`
//! 3. `BOT_*` environment variables
//! 4. Command line flags

pub mod error;
pub mod loader;
pub mod paths;
pub mod settings;
pub mod validation;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::Settings;
