//! Routes command updates to registered handlers.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::parse::{CommandInvocation, MentionPolicy};
use super::types::{DispatchError, DispatchOutcome, SkipReason};
use crate::commands::CommandRegistry;
use crate::update::Update;

/// Single entry point from the transport into command handling.
///
/// Holds no per-update state: every call to [`Dispatcher::dispatch`] is
/// independent, and the same update always yields the same outcome while
/// the registry is unchanged.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// Commands known to this bot.
    registry: Arc<CommandRegistry>,

    /// Which `@username` suffixes to answer.
    mention_policy: MentionPolicy,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry` that accepts any `@suffix`.
    #[must_use]
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            registry,
            mention_policy: MentionPolicy::default(),
        }
    }

    /// Sets the `@username` suffix policy.
    #[must_use]
    pub fn with_mention_policy(mut self, policy: MentionPolicy) -> Self {
        self.mention_policy = policy;
        self
    }

    /// Returns the registry this dispatcher reads from.
    #[must_use]
    pub const fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Dispatches one update.
    ///
    /// Malformed command entities degrade to [`DispatchOutcome::NoAction`];
    /// only handler failures are returned as errors.
    pub async fn dispatch(&self, update: &Update) -> Result<DispatchOutcome, DispatchError> {
        let Some(message) = &update.message else {
            debug!(
                "Update {} is a {}, not a message",
                update.update_id,
                update.kind_name()
            );
            return Ok(DispatchOutcome::NoAction(SkipReason::NotAMessage));
        };

        let Some(text) = &message.text else {
            return Ok(DispatchOutcome::NoAction(SkipReason::NoText));
        };

        let Some(entity) = message.entities.iter().find(|e| e.is_bot_command()) else {
            return Ok(DispatchOutcome::NoAction(SkipReason::NoCommand));
        };

        let invocation = match CommandInvocation::extract(text, entity) {
            Ok(invocation) => invocation,
            Err(e) => {
                warn!("Malformed command in update {}: {}", update.update_id, e);
                return Ok(DispatchOutcome::NoAction(SkipReason::Malformed(e)));
            }
        };

        if !self.mention_policy.accepts(invocation.mention.as_deref()) {
            debug!(
                "Ignoring '/{}' addressed to @{}",
                invocation.name,
                invocation.mention.as_deref().unwrap_or_default()
            );
            return Ok(DispatchOutcome::NoAction(SkipReason::AddressedElsewhere {
                username: invocation.mention.unwrap_or_default(),
            }));
        }

        let Some(entry) = self.registry.lookup(&invocation.name).await else {
            debug!("No handler registered for '/{}'", invocation.name);
            return Ok(DispatchOutcome::NoAction(SkipReason::UnknownCommand {
                name: invocation.name,
            }));
        };

        info!(
            "Dispatching '/{}' for chat {} ({} args)",
            entry.name(),
            message.chat.id,
            invocation.args.len()
        );

        let reply = entry
            .handler()
            .execute(update, &invocation.args)
            .await
            .map_err(|source| DispatchError::Handler {
                command: entry.name().to_owned(),
                source,
            })?;

        Ok(match reply {
            Some(reply) => DispatchOutcome::Reply(reply),
            None => DispatchOutcome::NoAction(SkipReason::Declined {
                command: entry.name().to_owned(),
            }),
        })
    }
}
