//! Command handler contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::dispatch::ReplyInstruction;
use crate::update::Update;

/// Errors a command handler can fail with.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Update is missing required data: {0}")]
    MissingData(&'static str),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A slash command the bot can answer.
///
/// `name` and `description` identify the command both in the dispatch table
/// and in the command menu published to the platform.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name without the leading `/`.
    fn name(&self) -> &str;

    /// Human-readable description for the command menu.
    fn description(&self) -> &str;

    /// Runs the command.
    ///
    /// `args` are the whitespace-separated tokens after the command.
    /// Returns `Ok(None)` to stay silent. Handlers doing their own network
    /// I/O own its timeout policy.
    async fn execute(
        &self,
        update: &Update,
        args: &[String],
    ) -> Result<Option<ReplyInstruction>, HandlerError>;
}
