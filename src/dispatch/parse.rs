//! Command extraction from `bot_command` entities.

use thiserror::Error;
use tracing::debug;

use crate::update::MessageEntity;

/// A `bot_command` entity that does not describe a usable span of the text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("Command entity has zero length")]
    Empty,

    #[error("Command entity {offset}+{length} exceeds text length of {text_len} UTF-16 units")]
    OutOfRange {
        offset: usize,
        length: usize,
        text_len: usize,
    },

    #[error("Command entity {offset}+{length} splits a surrogate pair")]
    SplitsCharacter { offset: usize, length: usize },

    #[error("Command entity does not start with '/'")]
    MissingSlash,
}

/// A command extracted from message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Lowercased command name without the `/` and any `@username` suffix.
    pub name: String,

    /// The `@username` suffix, without the `@`, if present.
    pub mention: Option<String>,

    /// Whitespace-separated tokens following the command.
    pub args: Vec<String>,
}

impl CommandInvocation {
    /// Extracts the command described by `entity` from `text`.
    ///
    /// # Errors
    ///
    /// Returns an [`EntityError`] if the span is empty, out of range, cuts a
    /// UTF-16 surrogate pair in half, or does not begin with `/`.
    pub fn extract(text: &str, entity: &MessageEntity) -> Result<Self, EntityError> {
        let MessageEntity { offset, length, .. } = *entity;

        if length == 0 {
            return Err(EntityError::Empty);
        }

        let text_len = text.encode_utf16().count();
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= text_len)
            .ok_or(EntityError::OutOfRange {
                offset,
                length,
                text_len,
            })?;

        let (start_byte, end_byte) = utf16_to_byte(text, offset)
            .zip(utf16_to_byte(text, end))
            .ok_or(EntityError::SplitsCharacter { offset, length })?;

        let token = text[start_byte..end_byte]
            .strip_prefix('/')
            .ok_or(EntityError::MissingSlash)?;

        let (name, mention) = match token.split_once('@') {
            Some((name, mention)) => (name, Some(mention.to_owned())),
            None => (token, None),
        };

        let args = text[end_byte..]
            .split_whitespace()
            .map(str::to_owned)
            .collect();

        debug!("Extracted command '{}' (mention: {:?})", name, mention);

        Ok(Self {
            name: name.to_lowercase(),
            mention,
            args,
        })
    }
}

/// Maps a UTF-16 code unit index to a byte index into `text`.
///
/// Returns `None` if the index falls inside a surrogate pair or past the end.
fn utf16_to_byte(text: &str, units: usize) -> Option<usize> {
    let mut seen = 0;
    for (byte_idx, ch) in text.char_indices() {
        if seen == units {
            return Some(byte_idx);
        }
        if seen > units {
            return None;
        }
        seen += ch.len_utf16();
    }
    (seen == units).then_some(text.len())
}

/// Decides which `@username` command suffixes this bot answers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MentionPolicy {
    /// Strip any suffix and dispatch regardless of the username.
    #[default]
    AcceptAny,

    /// Only dispatch suffixed commands addressed to this username.
    OwnOnly(String),
}

impl MentionPolicy {
    /// Builds an [`MentionPolicy::OwnOnly`] policy for `username`.
    ///
    /// A leading `@` is ignored and matching is case-insensitive.
    #[must_use]
    pub fn own_only(username: &str) -> Self {
        Self::OwnOnly(username.trim_start_matches('@').to_lowercase())
    }

    /// Returns true if a command with this suffix should be dispatched.
    #[must_use]
    pub fn accepts(&self, mention: Option<&str>) -> bool {
        match (self, mention) {
            (Self::AcceptAny, _) | (Self::OwnOnly(_), None) => true,
            (Self::OwnOnly(own), Some(mention)) => mention.eq_ignore_ascii_case(own),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str, offset: usize, length: usize) -> Result<CommandInvocation, EntityError> {
        CommandInvocation::extract(text, &MessageEntity::bot_command(offset, length))
    }

    #[test]
    fn test_extract_with_args() {
        let cmd = extract("/info hello world", 0, 5).unwrap();
        assert_eq!(cmd.name, "info");
        assert_eq!(cmd.mention, None);
        assert_eq!(cmd.args, vec!["hello", "world"]);
    }

    #[test]
    fn test_extract_strips_suffix_and_lowercases() {
        let cmd = extract("/Info@somebot extra", 0, 13).unwrap();
        assert_eq!(cmd.name, "info");
        assert_eq!(cmd.mention.as_deref(), Some("somebot"));
        assert_eq!(cmd.args, vec!["extra"]);
    }

    #[test]
    fn test_extract_irregular_whitespace() {
        let cmd = extract("/cmd   a   b", 0, 4).unwrap();
        assert_eq!(cmd.args, vec!["a", "b"]);

        let cmd = extract("/cmd \t\n a\u{3000}b  ", 0, 4).unwrap();
        assert_eq!(cmd.args, vec!["a", "b"]);
    }

    #[test]
    fn test_extract_no_args_is_empty() {
        assert!(extract("/start", 0, 6).unwrap().args.is_empty());
        assert!(extract("/start    ", 0, 6).unwrap().args.is_empty());
    }

    #[test]
    fn test_extract_not_at_start() {
        let cmd = extract("hey /ping now", 4, 5).unwrap();
        assert_eq!(cmd.name, "ping");
        assert_eq!(cmd.args, vec!["now"]);
    }

    #[test]
    fn test_extract_counts_utf16_units() {
        // "😀" is two UTF-16 units and four bytes.
        let text = "😀 /echo привет мир";
        let cmd = extract(text, 3, 5).unwrap();
        assert_eq!(cmd.name, "echo");
        assert_eq!(cmd.args, vec!["привет", "мир"]);
    }

    #[test]
    fn test_extract_out_of_range() {
        assert_eq!(
            extract("/info", 0, 9),
            Err(EntityError::OutOfRange {
                offset: 0,
                length: 9,
                text_len: 5
            })
        );
        assert!(matches!(
            extract("/info", usize::MAX, 2),
            Err(EntityError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_extract_splits_surrogate_pair() {
        assert_eq!(
            extract("😀/x", 1, 2),
            Err(EntityError::SplitsCharacter {
                offset: 1,
                length: 2
            })
        );
    }

    #[test]
    fn test_extract_empty_and_missing_slash() {
        assert_eq!(extract("/info", 0, 0), Err(EntityError::Empty));
        assert_eq!(extract("info", 0, 4), Err(EntityError::MissingSlash));
    }

    #[test]
    fn test_utf16_to_byte() {
        assert_eq!(utf16_to_byte("abc", 0), Some(0));
        assert_eq!(utf16_to_byte("abc", 3), Some(3));
        assert_eq!(utf16_to_byte("abc", 4), None);
        assert_eq!(utf16_to_byte("😀a", 2), Some(4));
        assert_eq!(utf16_to_byte("😀a", 1), None);
    }

    #[test]
    fn test_mention_policy() {
        let any = MentionPolicy::default();
        assert!(any.accepts(None));
        assert!(any.accepts(Some("otherbot")));

        let own = MentionPolicy::own_only("@MyBot");
        assert_eq!(own, MentionPolicy::OwnOnly("mybot".to_owned()));
        assert!(own.accepts(None));
        assert!(own.accepts(Some("mybot")));
        assert!(own.accepts(Some("MYBOT")));
        assert!(!own.accepts(Some("otherbot")));
    }
}
