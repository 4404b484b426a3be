//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};
use std::path::PathBuf;

/// Configuration merger that handles CLI argument integration with file-based configuration
///
/// Environment variables reach the merger through clap's `env` attributes,
/// so every `Some` value seen here already beats the config file.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Create a configuration merger by loading the explicit file or the first default one
    ///
    /// # Errors
    /// Returns ConfigError if the explicit file is missing or any file fails to parse
    pub fn from_config_path(config_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let config = ConfigLoader::new(config_path.cloned()).load()?;
        Ok(Self::new(config))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Precedence, highest first:
    /// 1. `--verbose` / `--quiet`
    /// 2. Command flags and their `BOT_*` environment variables
    /// 3. Configuration file values
    /// 4. Built-in defaults
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        Self::apply_global_overrides(&mut config, cli);

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.log_level = "debug".to_string();
            config.log_level_pinned = true;
        } else if cli.quiet {
            config.log_level = "error".to_string();
            config.log_level_pinned = true;
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        if let Commands::Serve { bot, .. } | Commands::Send { bot, .. } = command {
            if let Some(token) = &bot.bot_token {
                config.bot_token = token.clone();
            }
            if !bot.recipients.is_empty() {
                config.recipients = bot.recipients.clone();
            }
        }

        if let Commands::Serve {
            address,
            api_key,
            log_level,
            log_type,
            ..
        } = command
        {
            if let Some(address) = address {
                config.address = address.clone();
            }
            if let Some(api_key) = api_key {
                config.api_key = api_key.clone();
            }
            if let Some(level) = log_level {
                config.log_level = (*level).into();
            }
            if let Some(log_type) = log_type {
                config.log_type = (*log_type).into();
            }
        }
    }

    /// Get the base configuration
    pub fn base_config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{EnvGuard, env_lock};
    use clap::Parser;
    use std::io::Write;

    fn file_settings() -> Settings {
        Settings {
            bot_token: "123:file".to_string(),
            recipients: vec!["1".to_string()],
            address: "localhost:7000".to_string(),
            api_key: "FILEKEY".to_string(),
            ..Settings::default()
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_overrides_keeps_file_values() {
        let _lock = env_lock();
        let _env = EnvGuard::clear_bot_vars();

        let merged = ConfigurationMerger::new(file_settings())
            .merge_cli_args(&parse(&["tg-notifier", "serve"]))
            .unwrap();
        assert_eq!(merged, file_settings());
    }

    #[test]
    fn test_flags_override_file() {
        let _lock = env_lock();
        let _env = EnvGuard::clear_bot_vars();

        let merged = ConfigurationMerger::new(file_settings())
            .merge_cli_args(&parse(&[
                "tg-notifier",
                "serve",
                "0.0.0.0:8080",
                "--bot-token",
                "123:flag",
                "-r",
                "5,6",
                "--api-key",
                "",
                "--log-level",
                "warn",
                "--log-type",
                "json",
            ]))
            .unwrap();

        assert_eq!(merged.bot_token, "123:flag");
        assert_eq!(merged.recipients, vec!["5", "6"]);
        assert_eq!(merged.address, "0.0.0.0:8080");
        assert_eq!(merged.api_key, "");
        assert_eq!(merged.log_level, "warn");
        assert!(!merged.log_level_pinned);
        assert_eq!(merged.log_type, "json");
    }

    #[test]
    fn test_environment_overrides_file() {
        let _lock = env_lock();
        let _env = EnvGuard::clear_bot_vars()
            .set("BOT_TOKEN", "123:env")
            .set("BOT_API_KEY", "ENVKEY");

        let merged = ConfigurationMerger::new(file_settings())
            .merge_cli_args(&parse(&["tg-notifier", "serve"]))
            .unwrap();

        assert_eq!(merged.bot_token, "123:env");
        assert_eq!(merged.api_key, "ENVKEY");
        assert_eq!(merged.recipients, vec!["1"]);
    }

    #[test]
    fn test_verbose_and_quiet() {
        let _lock = env_lock();
        let _env = EnvGuard::clear_bot_vars().set("BOT_LOG_LEVEL", "warn");

        let merger = ConfigurationMerger::new(Settings::default());
        let merged = merger
            .merge_cli_args(&parse(&["tg-notifier", "-v", "serve"]))
            .unwrap();
        assert_eq!(merged.log_level, "debug");
        assert!(merged.log_level_pinned);

        let merged = merger
            .merge_cli_args(&parse(&["tg-notifier", "serve", "--quiet"]))
            .unwrap();
        assert_eq!(merged.log_level, "error");
        assert!(merged.log_level_pinned);

        let merged = merger
            .merge_cli_args(&parse(&["tg-notifier", "serve"]))
            .unwrap();
        assert_eq!(merged.log_level, "warn");
        assert!(!merged.log_level_pinned);
    }

    #[test]
    fn test_send_does_not_touch_server_fields() {
        let _lock = env_lock();
        let _env = EnvGuard::clear_bot_vars().set("BOT_ADDR", "127.0.0.1:9999");

        let merged = ConfigurationMerger::new(file_settings())
            .merge_cli_args(&parse(&["tg-notifier", "send", "-r", "9", "hi"]))
            .unwrap();

        assert_eq!(merged.address, "localhost:7000");
        assert_eq!(merged.recipients, vec!["9"]);
    }

    #[test]
    fn test_invalid_file_values_are_rejected() {
        let _lock = env_lock();
        let _env = EnvGuard::clear_bot_vars();

        let settings = Settings {
            log_type: "xml".to_string(),
            ..Settings::default()
        };
        let result =
            ConfigurationMerger::new(settings).merge_cli_args(&parse(&["tg-notifier", "send"]));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_from_config_path() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "bot_token: \"123:yaml\"").unwrap();

        let merger = ConfigurationMerger::from_config_path(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(merger.base_config().bot_token, "123:yaml");

        let missing = PathBuf::from("/definitely/not/here.yml");
        assert!(matches!(
            ConfigurationMerger::from_config_path(Some(&missing)),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
