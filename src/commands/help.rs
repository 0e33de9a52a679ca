//! `/help`: lists the registered commands.

use std::sync::Weak;

use async_trait::async_trait;

use super::{CommandHandler, CommandRegistry, HandlerError};
use crate::dispatch::ReplyInstruction;
use crate::update::Update;

/// Replies with the current command menu.
///
/// Holds a weak handle so registering it does not create an `Arc` cycle
/// with the registry.
#[derive(Debug)]
pub struct HelpCommand {
    registry: Weak<CommandRegistry>,
}

impl HelpCommand {
    #[must_use]
    pub const fn new(registry: Weak<CommandRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "List available commands"
    }

    async fn execute(
        &self,
        update: &Update,
        _args: &[String],
    ) -> Result<Option<ReplyInstruction>, HandlerError> {
        let message = update.message.as_ref().ok_or(HandlerError::MissingData("message"))?;
        let Some(registry) = self.registry.upgrade() else {
            return Ok(None);
        };

        let mut lines = vec!["Available commands:".to_owned()];
        lines.extend(
            registry
                .list()
                .await
                .iter()
                .map(|entry| format!("/{} - {}", entry.name(), entry.description())),
        );

        Ok(Some(ReplyInstruction::text(message.chat.id, lines.join("\n"))))
    }
}
