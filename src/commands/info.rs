//! `/info`: reports the ids of the current chat, sender and message.

use async_trait::async_trait;
use tracing::warn;

use super::{CommandHandler, HandlerError};
use crate::dispatch::ReplyInstruction;
use crate::update::Update;

const NOT_AVAILABLE: &str = "N/A";

/// Replies with an HTML card describing where the command was sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct InfoCommand;

#[async_trait]
impl CommandHandler for InfoCommand {
    fn name(&self) -> &str {
        "info"
    }

    fn description(&self) -> &str {
        "Show bot and chat information"
    }

    async fn execute(
        &self,
        update: &Update,
        _args: &[String],
    ) -> Result<Option<ReplyInstruction>, HandlerError> {
        let Some(message) = &update.message else {
            warn!("Info command invoked without a message in update {}", update.update_id);
            return Ok(None);
        };

        let sender = message
            .sender_id()
            .map_or_else(|| NOT_AVAILABLE.to_owned(), |id| id.to_string());
        let sent_at = message.sent_at().map_or_else(
            || NOT_AVAILABLE.to_owned(),
            |date| date.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );

        let text = format!(
            "<b>🤖 Bot info card</b>\n\
             --------------------------\n\
             <b>Your ID:</b> <code>{sender}</code>\n\
             <b>Chat ID:</b> <code>{}</code>\n\
             <b>Message ID:</b> <code>{}</code>\n\
             <b>Sent at:</b> <code>{sent_at}</code>",
            message.chat.id, message.message_id,
        );

        Ok(Some(ReplyInstruction::html(message.chat.id, text)))
    }
}
