//! Command menu building and validation.
//!
//! The registry accepts any name; the Bot API does not. Menus are checked
//! here before they are published.

use thiserror::Error;

use super::BotCommandSpec;
use crate::commands::CommandRegistry;

/// Maximum number of commands in a menu.
pub const MAX_COMMANDS: usize = 100;

/// Maximum command name length.
pub const MAX_COMMAND_LENGTH: usize = 32;

/// Maximum command description length.
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

/// Reasons a command menu cannot be published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("Too many commands: {0} (max: 100)")]
    TooMany(usize),

    #[error("Command '{0}' must be 1-32 characters of a-z, 0-9 and '_'")]
    InvalidName(String),

    #[error("Description of '{0}' must be 1-256 characters")]
    InvalidDescription(String),
}

/// Builds the command menu from the registry, in registration order.
pub async fn command_menu(registry: &CommandRegistry) -> Vec<BotCommandSpec> {
    registry
        .list()
        .await
        .iter()
        .map(|entry| BotCommandSpec::new(entry.name(), entry.description()))
        .collect()
}

/// Checks a menu against the Bot API limits.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_menu(commands: &[BotCommandSpec]) -> Result<(), MenuError> {
    if commands.len() > MAX_COMMANDS {
        return Err(MenuError::TooMany(commands.len()));
    }

    for spec in commands {
        let name_ok = (1..=MAX_COMMAND_LENGTH).contains(&spec.command.len())
            && spec
                .command
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !name_ok {
            return Err(MenuError::InvalidName(spec.command.clone()));
        }

        let description_len = spec.description.trim().chars().count();
        if description_len == 0 || spec.description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(MenuError::InvalidDescription(spec.command.clone()));
        }
    }

    Ok(())
}
