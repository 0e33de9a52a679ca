//! Update dispatching.
//!
//! Turns one decoded update into either a reply instruction or "no action":
//! finds the first `bot_command` entity, extracts the command name and
//! arguments, and invokes the matching registered handler.

mod dispatcher;
mod parse;
mod types;

pub use dispatcher::Dispatcher;
pub use parse::{CommandInvocation, EntityError, MentionPolicy};
pub use types::{DispatchError, DispatchOutcome, ParseMode, ReplyInstruction, ReplyMethod, SkipReason};
