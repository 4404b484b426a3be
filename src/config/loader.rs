//! Configuration loader for tg-notifier
//!
//! Reads the YAML config file on top of built-in defaults. Environment
//! variables and command line flags are layered afterwards by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use tracing::debug;

use crate::config::error::ConfigError;
use crate::config::paths::default_config_paths;
use crate::config::settings::Settings;

/// Resolves and loads the configuration file.
///
/// # Lookup
/// 1. An explicit path (`--config` or `$BOT_CONFIG_PATH`), which must exist
/// 2. The first existing file among the default locations
/// 3. No file at all, built-in defaults are used
#[derive(Debug)]
pub struct ConfigLoader {
    /// Explicitly requested file
    config_file: Option<PathBuf>,
    /// Default locations probed when no explicit file is given
    candidates: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Loader probing the default locations.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self::with_candidates(config_file, default_config_paths())
    }

    /// Loader probing a custom list of locations.
    pub fn with_candidates(config_file: Option<PathBuf>, candidates: Vec<PathBuf>) -> Self {
        Self {
            config_file,
            candidates,
        }
    }

    /// Locations that are probed when no explicit file is given.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Path of the file that will be loaded, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] when the explicit file is missing.
    pub fn resolve(&self) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(path) = &self.config_file {
            if !path.is_file() {
                return Err(ConfigError::file_not_found(path.display().to_string()));
            }
            return Ok(Some(path.clone()));
        }

        Ok(self.candidates.iter().find(|path| path.is_file()).cloned())
    }

    /// Load settings from the resolved file, or defaults when there is none.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        match self.resolve()? {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                Self::load_file(&path)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Settings::default())
            }
        }
    }

    fn load_file(path: &Path) -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml).required(true))
            .build()?;

        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!(
                "Failed to deserialize configuration from {}: {}",
                path.display(),
                e
            ))
        })
    }
}
