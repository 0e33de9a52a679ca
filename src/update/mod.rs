//! Inbound update model.
//!
//! Typed representation of the JSON bodies the platform pushes to the
//! webhook. Only `message` updates take part in command dispatch; the
//! other payload kinds decode so they can be acknowledged and logged.

mod entity;
mod types;

pub use entity::{EntityKind, MessageEntity};
pub use types::{CallbackQuery, Chat, ChatType, Message, Update, UpdateKind, User};
