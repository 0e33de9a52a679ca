//! Message entities: tagged spans over message text.

use serde::{Deserialize, Serialize};

use super::User;

/// Type of a message entity, with any data specific to that type.
///
/// Only [`EntityKind::BotCommand`] matters for dispatch. Every other kind is
/// carried through untouched, and types the platform adds later decode as
/// [`EntityKind::Other`] instead of failing the whole update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Blockquote,
    Code,
    Pre {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    TextLink {
        url: String,
    },
    TextMention {
        user: User,
    },
    CustomEmoji {
        custom_emoji_id: String,
    },
    #[serde(other)]
    Other,
}

/// A span `[offset, offset + length)` over the message text.
///
/// Offsets and lengths count UTF-16 code units, not bytes or chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(flatten)]
    pub kind: EntityKind,

    pub offset: usize,

    pub length: usize,
}

impl MessageEntity {
    /// Creates an entity of the given kind.
    #[must_use]
    pub const fn new(kind: EntityKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
        }
    }

    /// Creates a `bot_command` entity.
    #[must_use]
    pub const fn bot_command(offset: usize, length: usize) -> Self {
        Self::new(EntityKind::BotCommand, offset, length)
    }

    /// Returns true for `bot_command` entities.
    #[must_use]
    pub const fn is_bot_command(&self) -> bool {
        matches!(self.kind, EntityKind::BotCommand)
    }
}
