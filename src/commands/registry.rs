//! Command registry: name to handler lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::CommandHandler;

/// A registered command.
#[derive(Clone)]
pub struct CommandEntry {
    /// Lowercased command name.
    name: String,

    description: String,

    handler: Arc<dyn CommandHandler>,
}

impl CommandEntry {
    /// Creates an entry. The name is lowercased; no charset validation is done.
    #[must_use]
    pub fn new(
        name: impl AsRef<str>,
        description: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.as_ref().to_lowercase(),
            description: description.into(),
            handler,
        }
    }

    /// Creates an entry from the handler's own name and description.
    #[must_use]
    pub fn from_handler(handler: Arc<dyn CommandHandler>) -> Self {
        let name = handler.name().to_lowercase();
        let description = handler.description().to_owned();
        Self {
            name,
            description,
            handler,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Entries {
    /// Names in first-registration order.
    order: Vec<String>,

    by_name: HashMap<String, Arc<CommandEntry>>,
}

/// Set of commands the dispatcher can route to.
///
/// Normally filled once at startup and only read afterwards. Registration
/// at runtime is still safe: lookups never observe a half-written entry.
#[derive(Default)]
pub struct CommandRegistry {
    entries: RwLock<Entries>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, replacing any entry with the same name.
    ///
    /// The last registration wins. A replaced entry keeps its original
    /// position in [`list`](Self::list). Returns the replaced entry.
    pub async fn register(&self, entry: CommandEntry) -> Option<Arc<CommandEntry>> {
        let mut entries = self.entries.write().await;
        let name = entry.name.clone();
        let replaced = entries.by_name.insert(name.clone(), Arc::new(entry));

        if replaced.is_some() {
            info!("Replaced handler for '/{}'", name);
        } else {
            debug!("Registered '/{}'", name);
            entries.order.push(name);
        }

        replaced
    }

    /// Registers a handler under its own name and description.
    pub async fn register_handler(
        &self,
        handler: Arc<dyn CommandHandler>,
    ) -> Option<Arc<CommandEntry>> {
        self.register(CommandEntry::from_handler(handler)).await
    }

    /// Looks up a command, case-insensitively.
    ///
    /// `None` is a normal outcome, not an error.
    pub async fn lookup(&self, name: &str) -> Option<Arc<CommandEntry>> {
        let entries = self.entries.read().await;
        entries.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Returns all entries in registration order.
    pub async fn list(&self) -> Vec<Arc<CommandEntry>> {
        let entries = self.entries.read().await;
        entries
            .order
            .iter()
            .filter_map(|name| entries.by_name.get(name).cloned())
            .collect()
    }

    /// Returns the number of registered commands.
    pub async fn len(&self) -> usize {
        self.entries.read().await.order.len()
    }

    /// Returns true if no commands are registered.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.order.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entries.try_read() {
            Ok(entries) => f
                .debug_struct("CommandRegistry")
                .field("commands", &entries.order)
                .finish(),
            Err(_) => f.debug_struct("CommandRegistry").finish_non_exhaustive(),
        }
    }
}
