//! Bot API request and response types.

use serde::{Deserialize, Serialize};

/// Envelope every Bot API method responds with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,

    /// Absent on errors; a missing field decodes as `None`.
    pub result: Option<T>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub error_code: Option<i32>,
}

/// Current webhook status, as returned by `getWebhookInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookInfo {
    /// Webhook URL, empty if no webhook is set.
    pub url: String,

    pub has_custom_certificate: bool,

    pub pending_update_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error_date: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synchronization_error_date: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

/// One entry of the command menu shown by Telegram clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommandSpec {
    pub command: String,
    pub description: String,
}

impl BotCommandSpec {
    #[must_use]
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SetWebhookParams<'a> {
    pub url: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<&'a str>,

    pub allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteWebhookParams {
    pub drop_pending_updates: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct SetMyCommandsParams<'a> {
    pub commands: &'a [BotCommandSpec],
}

/// Empty parameter object for methods that take none.
#[derive(Debug, Serialize)]
pub(super) struct NoParams {}
