//! Application settings and Telegram configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dispatch::MentionPolicy;

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Telegram Bot API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by `@BotFather` (`<bot id>:<secret>`).
    pub bot_token: String,

    /// Bot API base URL, overridable for a self-hosted Bot API server.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

impl TelegramConfig {
    /// Creates a new Telegram configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not shaped like `<digits>:<secret>`.
    pub fn new(bot_token: String) -> Result<Self, ConfigError> {
        validate_token(&bot_token)?;
        Ok(Self {
            bot_token,
            api_url: default_api_url(),
        })
    }

    /// Creates configuration from environment variables.
    ///
    /// Expects `TELEGRAM_BOT_TOKEN`; `TELEGRAM_API_URL` is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token =
            get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN"))?;
        validate_token(&bot_token)?;

        let api_url = get("TELEGRAM_API_URL")
            .map_or_else(default_api_url, |url| url.trim_end_matches('/').to_owned());

        Ok(Self { bot_token, api_url })
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

fn validate_token(token: &str) -> Result<(), ConfigError> {
    match token.split_once(':') {
        Some((id, secret))
            if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) && !secret.is_empty() =>
        {
            Ok(())
        }
        _ => Err(ConfigError::InvalidToken),
    }
}

/// Bot-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Address the webhook server listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path the platform posts updates to.
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    /// Expected `X-Telegram-Bot-Api-Secret-Token` header value.
    #[serde(default)]
    pub webhook_secret: Option<String>,

    /// This bot's username, used to recognise `/command@username`.
    #[serde(default)]
    pub bot_username: Option<String>,

    /// Ignore commands suffixed with another bot's username.
    #[serde(default)]
    pub ignore_foreign_commands: bool,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_owned()
}

fn default_webhook_path() -> String {
    "/api/webhook".to_owned()
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            webhook_path: default_webhook_path(),
            webhook_secret: None,
            bot_username: None,
            ignore_foreign_commands: false,
        }
    }
}

impl BotSettings {
    /// Creates bot settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| get(key).filter(|v: &String| !v.trim().is_empty());

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(default_bind_addr),
            webhook_path: non_empty("WEBHOOK_PATH")
                .map_or_else(default_webhook_path, |p| normalize_path(&p)),
            webhook_secret: non_empty("WEBHOOK_SECRET"),
            bot_username: non_empty("BOT_USERNAME"),
            ignore_foreign_commands: non_empty("IGNORE_FOREIGN_COMMANDS")
                .is_some_and(|v| parse_flag(&v)),
        }
    }

    /// Returns the `@username` suffix policy these settings select.
    ///
    /// Foreign commands can only be ignored when the bot's own username is
    /// known; otherwise every suffix is accepted.
    #[must_use]
    pub fn mention_policy(&self) -> MentionPolicy {
        match (&self.bot_username, self.ignore_foreign_commands) {
            (Some(username), true) => MentionPolicy::own_only(username),
            _ => MentionPolicy::AcceptAny,
        }
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid bot token format (expected '<bot id>:<secret>')")]
    InvalidToken,
}
