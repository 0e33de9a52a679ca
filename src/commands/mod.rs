//! Command handling module.
//!
//! Defines the handler contract, the registry the dispatcher routes
//! through, and the built-in `/info` and `/help` commands.

mod handler;
mod help;
mod info;
mod registry;

pub use handler::{CommandHandler, HandlerError};
pub use help::HelpCommand;
pub use info::InfoCommand;
pub use registry::{CommandEntry, CommandRegistry};
