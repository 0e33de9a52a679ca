//! Bot API client for webhook and command menu management.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::menu::{MenuError, validate_menu};
use super::types::{
    ApiResponse, BotCommandSpec, DeleteWebhookParams, NoParams, SetMyCommandsParams,
    SetWebhookParams, WebhookInfo,
};
use crate::config::TelegramConfig;
use crate::update::User;

/// Update kinds requested when registering the webhook.
const ALLOWED_UPDATES: &[&str] = &[
    "message",
    "edited_message",
    "channel_post",
    "edited_channel_post",
    "callback_query",
];

/// Errors that can occur during Bot API calls.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Bot API error {code}: {description}")]
    Api { code: i32, description: String },

    #[error("Bot API returned ok without a result for {0}")]
    MissingResult(&'static str),

    #[error("Invalid command menu: {0}")]
    InvalidMenu(#[from] MenuError),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs embed the bot token.
        Self::Http(err.without_url())
    }
}

/// Thin client over the Bot API methods the bot's bootstrap needs.
pub struct BotApi {
    client: reqwest::Client,

    /// `{api_url}/bot{token}`; never logged.
    base_url: String,
}

impl BotApi {
    /// Creates a client for the configured bot.
    #[must_use]
    pub fn new(config: &TelegramConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a client reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &TelegramConfig) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{}", config.api_url, config.bot_token),
        }
    }

    /// Calls a Bot API method and unwraps its response envelope.
    async fn call<P, T>(&self, method: &'static str, params: &P) -> Result<T, TelegramError>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!("Calling Bot API method {}", method);

        // Error responses carry a JSON envelope too, so the status is not checked.
        let response: ApiResponse<T> = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(params)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            let code = response.error_code.unwrap_or_default();
            let description = response
                .description
                .unwrap_or_else(|| "no description".to_owned());
            warn!("Bot API method {} failed ({}): {}", method, code, description);
            return Err(TelegramError::Api { code, description });
        }

        response.result.ok_or(TelegramError::MissingResult(method))
    }

    /// Returns the bot's own account.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &NoParams {}).await
    }

    /// Points the platform at `url` for update delivery.
    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<bool, TelegramError> {
        info!("Setting webhook to {}", url);
        self.call(
            "setWebhook",
            &SetWebhookParams {
                url,
                secret_token,
                allowed_updates: ALLOWED_UPDATES,
            },
        )
        .await
    }

    /// Removes the webhook.
    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool, TelegramError> {
        info!("Deleting webhook (drop pending: {})", drop_pending_updates);
        self.call(
            "deleteWebhook",
            &DeleteWebhookParams {
                drop_pending_updates,
            },
        )
        .await
    }

    /// Returns the current webhook status.
    pub async fn get_webhook_info(&self) -> Result<WebhookInfo, TelegramError> {
        self.call("getWebhookInfo", &NoParams {}).await
    }

    /// Publishes the command menu after checking it against Bot API limits.
    pub async fn set_my_commands(&self, commands: &[BotCommandSpec]) -> Result<bool, TelegramError> {
        validate_menu(commands)?;
        info!("Publishing {} commands", commands.len());
        self.call("setMyCommands", &SetMyCommandsParams { commands })
            .await
    }

    /// Returns the currently published command menu.
    pub async fn get_my_commands(&self) -> Result<Vec<BotCommandSpec>, TelegramError> {
        self.call("getMyCommands", &NoParams {}).await
    }
}

impl std::fmt::Debug for BotApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotApi").finish_non_exhaustive()
    }
}
