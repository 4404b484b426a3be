//! Helpers shared by tests that touch process-wide state.

use std::sync::{Mutex, MutexGuard};

/// Every variable the CLI binds through clap's `env` attribute.
pub const BOT_VARS: &[&str] = &[
    "BOT_TOKEN",
    "BOT_RECIPIENTS",
    "BOT_ADDR",
    "BOT_API_KEY",
    "BOT_LOG_LEVEL",
    "BOT_LOG_TYPE",
    "BOT_CONFIG_PATH",
];

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Serialize tests that read or write environment variables.
pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Restores modified environment variables on drop.
///
/// Hold [`env_lock`] for as long as the guard lives.
#[derive(Default)]
pub struct EnvGuard {
    vars_to_restore: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard with every `BOT_*` variable removed.
    pub fn clear_bot_vars() -> Self {
        BOT_VARS.iter().fold(Self::new(), |guard, key| guard.remove(key))
    }

    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.remember(key);
        unsafe {
            std::env::set_var(key, value);
        }
        self
    }

    pub fn remove(mut self, key: &str) -> Self {
        self.remember(key);
        unsafe {
            std::env::remove_var(key);
        }
        self
    }

    fn remember(&mut self, key: &str) {
        let original = std::env::var(key).ok();
        self.vars_to_restore.push((key.to_string(), original));
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original_value) in self.vars_to_restore.iter().rev() {
            unsafe {
                match original_value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
