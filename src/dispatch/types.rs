//! Dispatch results and reply instructions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EntityError;
use crate::commands::HandlerError;

/// Bot API method a reply instruction invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyMethod {
    #[serde(rename = "sendMessage")]
    SendMessage,
}

/// Text formatting mode for a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    MarkdownV2,
    Markdown,
}

/// A method call returned as the webhook response body.
///
/// The platform executes it on the bot's behalf, so replying costs no
/// extra API round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyInstruction {
    pub method: ReplyMethod,

    pub chat_id: i64,

    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
}

impl ReplyInstruction {
    /// Creates a plain-text `sendMessage` reply.
    #[must_use]
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            method: ReplyMethod::SendMessage,
            chat_id,
            text: text.into(),
            parse_mode: None,
        }
    }

    /// Creates an HTML-formatted `sendMessage` reply.
    #[must_use]
    pub fn html(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            parse_mode: Some(ParseMode::Html),
            ..Self::text(chat_id, text)
        }
    }
}

/// Why a dispatch produced no reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The update carries no `message` payload.
    NotAMessage,

    /// The message has no text.
    NoText,

    /// The text has no `bot_command` entity.
    NoCommand,

    /// The first `bot_command` entity does not describe a valid span.
    Malformed(EntityError),

    /// The command carried an `@username` suffix naming another bot.
    AddressedElsewhere { username: String },

    /// No handler is registered under the extracted name.
    UnknownCommand { name: String },

    /// The handler ran and chose not to reply.
    Declined { command: String },
}

/// Outcome of dispatching one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Send this instruction back as the webhook response.
    Reply(ReplyInstruction),

    /// Acknowledge with an empty response.
    NoAction(SkipReason),
}

impl DispatchOutcome {
    /// Returns the reply instruction, if any.
    #[must_use]
    pub const fn reply(&self) -> Option<&ReplyInstruction> {
        match self {
            Self::Reply(reply) => Some(reply),
            Self::NoAction(_) => None,
        }
    }

    /// Returns true if nothing should be sent back.
    #[must_use]
    pub const fn is_no_action(&self) -> bool {
        matches!(self, Self::NoAction(_))
    }
}

/// Errors surfaced by [`Dispatcher::dispatch`](super::Dispatcher::dispatch).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Command '/{command}' failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: HandlerError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_reply_json_shape() {
        let reply = ReplyInstruction::html(-42, "<b>hi</b>");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({
                "method": "sendMessage",
                "chat_id": -42,
                "text": "<b>hi</b>",
                "parse_mode": "HTML"
            })
        );
    }

    #[test]
    fn test_plain_reply_omits_parse_mode() {
        let value = serde_json::to_value(ReplyInstruction::text(7, "ok")).unwrap();
        assert!(value.get("parse_mode").is_none());
        assert_eq!(value["method"], "sendMessage");
    }

    #[test]
    fn test_outcome_accessors() {
        let reply = DispatchOutcome::Reply(ReplyInstruction::text(1, "x"));
        assert_eq!(reply.reply().map(|r| r.chat_id), Some(1));
        assert!(!reply.is_no_action());

        let skipped = DispatchOutcome::NoAction(SkipReason::NoText);
        assert!(skipped.reply().is_none());
        assert!(skipped.is_no_action());
    }
}
