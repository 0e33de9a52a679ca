//! Configuration module for the webhook bot.
//!
//! Loads the Bot API credentials and the webhook server settings from the
//! environment.

mod settings;

pub use settings::{BotSettings, ConfigError, DEFAULT_API_URL, TelegramConfig};
