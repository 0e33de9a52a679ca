//! Update, message, chat and user types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MessageEntity;

/// Kind of chat a message was sent in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,

    /// A chat type this build does not know about yet.
    #[serde(other)]
    Unknown,
}

/// A chat (private conversation, group or channel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique chat identifier.
    pub id: i64,

    #[serde(rename = "type")]
    pub kind: ChatType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Title for groups, supergroups and channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A user or bot account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    #[serde(default)]
    pub is_bot: bool,

    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// A message in a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,

    /// Sender. Absent for channel posts and anonymous group admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,

    /// Chat the message was sent on behalf of, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_chat: Option<Chat>,

    /// Unix timestamp (seconds).
    pub date: i64,

    pub chat: Chat,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Structured spans over `text`, in the order the platform sent them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
}

impl Message {
    /// Returns the message date as a UTC timestamp.
    ///
    /// `None` if the platform sent a date outside chrono's range.
    #[must_use]
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// Returns the sender's user id, if the message has a user sender.
    #[must_use]
    pub fn sender_id(&self) -> Option<i64> {
        self.from.as_ref().map(|user| user.id)
    }
}

/// An inline keyboard button press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,

    pub from: User,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,

    pub chat_instance: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_short_name: Option<String>,
}

/// One incoming event pushed to the webhook.
///
/// At most one payload field is populated. `update_id` grows monotonically
/// but is not contiguous; gaps are not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

/// Borrowed view of the payload an [`Update`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind<'a> {
    Message(&'a Message),
    EditedMessage(&'a Message),
    ChannelPost(&'a Message),
    EditedChannelPost(&'a Message),
    CallbackQuery(&'a CallbackQuery),

    /// A payload type this model does not decode, or none at all.
    Unsupported,
}

impl Update {
    /// Returns the populated payload.
    ///
    /// If the platform ever populated more than one field, the first in
    /// declaration order wins.
    #[must_use]
    pub fn kind(&self) -> UpdateKind<'_> {
        if let Some(message) = &self.message {
            UpdateKind::Message(message)
        } else if let Some(message) = &self.edited_message {
            UpdateKind::EditedMessage(message)
        } else if let Some(message) = &self.channel_post {
            UpdateKind::ChannelPost(message)
        } else if let Some(message) = &self.edited_channel_post {
            UpdateKind::EditedChannelPost(message)
        } else if let Some(query) = &self.callback_query {
            UpdateKind::CallbackQuery(query)
        } else {
            UpdateKind::Unsupported
        }
    }

    /// Short label for logging.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind() {
            UpdateKind::Message(_) => "message",
            UpdateKind::EditedMessage(_) => "edited_message",
            UpdateKind::ChannelPost(_) => "channel_post",
            UpdateKind::EditedChannelPost(_) => "edited_channel_post",
            UpdateKind::CallbackQuery(_) => "callback_query",
            UpdateKind::Unsupported => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::EntityKind;

    #[test]
    fn test_decode_command_message() {
        let json = r#"{
            "update_id": 10000,
            "message": {
                "message_id": 1365,
                "from": {"id": 1111111, "is_bot": false, "first_name": "Test", "username": "tester"},
                "chat": {"id": -1001234, "type": "supergroup", "title": "Test Group"},
                "date": 1441645532,
                "text": "/info hello",
                "entities": [{"type": "bot_command", "offset": 0, "length": 5}]
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        let UpdateKind::Message(message) = update.kind() else {
            panic!("expected a message update");
        };

        assert_eq!(update.update_id, 10000);
        assert_eq!(message.chat.kind, ChatType::Supergroup);
        assert_eq!(message.sender_id(), Some(1_111_111));
        assert_eq!(message.entities.len(), 1);
        assert_eq!(message.entities[0].kind, EntityKind::BotCommand);
        assert_eq!(
            message.sent_at().map(|d| d.to_rfc3339()),
            Some("2015-09-07T17:05:32+00:00".to_owned())
        );
    }

    #[test]
    fn test_decode_channel_post_without_sender() {
        let json = r#"{
            "update_id": 7,
            "channel_post": {
                "message_id": 3,
                "chat": {"id": -100999, "type": "channel", "title": "News"},
                "date": 1700000000,
                "text": "hello"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.kind_name(), "channel_post");
        let UpdateKind::ChannelPost(post) = update.kind() else {
            panic!("expected a channel post");
        };
        assert_eq!(post.sender_id(), None);
        assert!(post.entities.is_empty());
    }

    #[test]
    fn test_decode_callback_query() {
        let json = r#"{
            "update_id": 8,
            "callback_query": {
                "id": "4382bfdwdsb323b2d9",
                "from": {"id": 42, "is_bot": false, "first_name": "A"},
                "chat_instance": "-123",
                "data": "button_1"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        match update.kind() {
            UpdateKind::CallbackQuery(query) => assert_eq!(query.data.as_deref(), Some("button_1")),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_first_populated_payload_wins() {
        let json = r#"{
            "update_id": 1,
            "message": {
                "message_id": 2,
                "chat": {"id": 3, "type": "private"},
                "date": 1700000000,
                "text": "/info"
            },
            "callback_query": {
                "id": "cb1",
                "from": {"id": 42, "is_bot": false, "first_name": "A"},
                "chat_instance": "-123",
                "data": "button_1"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        assert!(update.callback_query.is_some());
        assert_eq!(update.kind_name(), "message");
        let UpdateKind::Message(message) = update.kind() else {
            panic!("expected the message payload");
        };
        assert_eq!(message.chat.id, 3);
    }

    #[test]
    fn test_unknown_payload_is_unsupported() {
        let json = r#"{"update_id": 9, "poll": {"id": "1"}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.kind(), UpdateKind::Unsupported);
    }

    #[test]
    fn test_unknown_chat_type_decodes() {
        let json = r#"{"id": 1, "type": "forum_topic"}"#;
        let chat: Chat = serde_json::from_str(json).unwrap();
        assert_eq!(chat.kind, ChatType::Unknown);
    }
}
