//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// Relay notifications to Telegram chats
#[derive(Parser, Debug)]
#[command(name = "tg-notifier")]
#[command(about = "Relay notifications to Telegram chats over HTTP or the command line")]
#[command(long_about = "
tg-notifier forwards messages to one or more Telegram chats through a bot.
It runs a small HTTP server with an optional API key, or sends a single
message straight from the command line.

Every option can also be set in the YAML config file or through the
matching BOT_* environment variable. Flags win over environment variables,
which win over the config file.

EXAMPLES:
    # Start the server on the default address (localhost:6000)
    tg-notifier serve

    # Listen on all interfaces and require an API key
    tg-notifier serve 0.0.0.0:6000 --api-key \"$(tg-notifier generate-key)\"

    # Send a message to two chats
    tg-notifier send -r 227039625,@my_channel 'Backup finished'

    # Send formatted text read from stdin
    echo '*done*' | tg-notifier send -m MarkdownV2

    # Check configuration without starting the server
    tg-notifier serve --dry-run
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// YAML file to load instead of the default locations. The file must exist.
    ///
    /// Example: --config /etc/tgnotifier.yml
    #[arg(short, long, global = true, value_name = "FILE", env = "BOT_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    ///
    /// Sets the log level to debug. Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Sets the log level to error. Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments shared by commands that talk to the bot
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BotArgs {
    /// Recipients of the message
    ///
    /// Chat ids or @channel usernames, comma separated or repeated.
    #[arg(
        short,
        long,
        value_name = "ID",
        value_delimiter = ',',
        allow_negative_numbers = true,
        env = "BOT_RECIPIENTS",
        value_parser = super::validation::validate_recipient
    )]
    pub recipients: Vec<String>,

    /// Bot token as given by BotFather
    #[arg(long, value_name = "TOKEN", env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    ///
    /// Verifies the bot token against the Telegram API, then serves
    /// `GET /` (health) and `POST /` (notify).
    ///
    /// Examples:
    ///   tg-notifier serve                         # localhost:6000
    ///   tg-notifier serve 0.0.0.0:8080            # all interfaces
    ///   tg-notifier serve --dry-run               # validate config only
    Serve {
        #[command(flatten)]
        bot: BotArgs,

        /// HTTP server listening address
        ///
        /// Default: localhost:6000
        #[arg(
            value_name = "ADDRESS",
            env = "BOT_ADDR",
            value_parser = super::validation::validate_listen_address
        )]
        address: Option<String>,

        /// API key required from clients
        ///
        /// Sent in the X-API-KEY header or cookie. Empty disables authentication.
        #[arg(long, value_name = "KEY", env = "BOT_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Log level override
        #[arg(long, value_enum, env = "BOT_LOG_LEVEL")]
        log_level: Option<LogLevel>,

        /// Log output format
        #[arg(long, value_enum, env = "BOT_LOG_TYPE")]
        log_type: Option<LogType>,

        /// Validate configuration and exit
        ///
        /// Checks the merged configuration without contacting Telegram
        /// or binding the listening address.
        #[arg(long)]
        dry_run: bool,
    },

    /// Send a single message
    ///
    /// The message is read from stdin when not given as an argument.
    ///
    /// Examples:
    ///   tg-notifier send -r 227039625 'Hello'
    ///   uptime | tg-notifier send
    Send {
        #[command(flatten)]
        bot: BotArgs,

        /// Parse mode of the message
        ///
        /// One of MarkdownV2, HTML, Markdown. Plain text when omitted.
        #[arg(short = 'm', long, value_name = "MODE")]
        parse_mode: Option<String>,

        /// Message text, read from stdin when omitted
        #[arg(value_name = "MESSAGE")]
        message: Option<String>,
    },

    /// Generate a random API key
    GenerateKey,

    /// Show version and configuration file locations
    Version,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

/// Log output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogType {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Cli {
    /// Arguments shared by bot commands, if the selected command has them.
    pub fn bot_args(&self) -> Option<&BotArgs> {
        match &self.command {
            Some(Commands::Serve { bot, .. }) | Some(Commands::Send { bot, .. }) => Some(bot),
            _ => None,
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<LogType> for String {
    fn from(log_type: LogType) -> Self {
        match log_type {
            LogType::Text => "text".to_string(),
            LogType::Json => "json".to_string(),
        }
    }
}
