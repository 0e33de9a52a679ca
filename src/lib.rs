//! Webhook Command Bot Library
//!
//! A Telegram bot that answers slash commands pushed to a webhook.
//!
//! This crate provides the core functionality for:
//! - Decoding pushed updates into typed messages and entities
//! - Registering command handlers by name
//! - Extracting commands and arguments and dispatching them
//! - Serving the webhook and managing it through the Bot API

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod server;
pub mod telegram;
pub mod update;
