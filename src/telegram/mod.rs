//! Telegram Bot API client module.
//!
//! Used at bootstrap to register the webhook URL and publish the command
//! menu. Replies to updates do not go through here: they are returned as
//! the webhook response body.

mod client;
mod menu;
mod types;

pub use client::{BotApi, TelegramError};
pub use menu::{
    MAX_COMMAND_LENGTH, MAX_COMMANDS, MAX_DESCRIPTION_LENGTH, MenuError, command_menu,
    validate_menu,
};
pub use types::{ApiResponse, BotCommandSpec, WebhookInfo};
