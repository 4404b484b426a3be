//! tg-notifier Library
//!
//! Relays notifications to Telegram chats. The [`telegram`] module holds the
//! delivery core; [`api`], [`cli`] and [`server`] are the ways to reach it.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod server;
pub mod state;
pub mod telegram;

#[cfg(test)]
pub(crate) mod test_utils;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
