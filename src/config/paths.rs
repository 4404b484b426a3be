//! Well-known configuration file locations.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "tgnotifier";
const USER_CONFIG_FILE: &str = "config.yml";

/// System-wide configuration file.
#[cfg(not(windows))]
pub const GLOBAL_CONFIG_PATH: &str = "/etc/tgnotifier.yml";

/// `${XDG_CONFIG_HOME}/tgnotifier/config.yml`, falling back to `$HOME/.config`.
#[cfg(not(windows))]
pub fn user_config_path() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME")
                .filter(|dir| !dir.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })?;
    Some(base.join(APP_DIR).join(USER_CONFIG_FILE))
}

/// `%APPDATA%\tgnotifier\config.yml`
#[cfg(windows)]
pub fn user_config_path() -> Option<PathBuf> {
    env::var_os("APPDATA")
        .filter(|dir| !dir.is_empty())
        .map(|dir| PathBuf::from(dir).join(APP_DIR).join(USER_CONFIG_FILE))
}

#[cfg(not(windows))]
fn global_config_path() -> Option<PathBuf> {
    Some(PathBuf::from(GLOBAL_CONFIG_PATH))
}

#[cfg(windows)]
fn global_config_path() -> Option<PathBuf> {
    env::var_os("PROGRAMDATA")
        .filter(|dir| !dir.is_empty())
        .map(|dir| PathBuf::from(dir).join(APP_DIR).join(USER_CONFIG_FILE))
}

/// Candidate files in lookup order, the first existing one wins.
pub fn default_config_paths() -> Vec<PathBuf> {
    user_config_path()
        .into_iter()
        .chain(global_config_path())
        .collect()
}
