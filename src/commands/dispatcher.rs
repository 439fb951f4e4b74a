use std::sync::Arc;

use super::handler::{ModelCommand, UseCommand};
use super::registry::CommandRegistry;
use crate::core::error::RelayError;
use crate::session::Session;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Recognize and run a command embedded in a chat turn.
    ///
    /// Only `/<name> <arg>` with a registered name counts: a bare `/use`, an
    /// unknown `/foo bar`, or a slash appearing mid-text all return `None`
    /// and fall through to normal provider routing.
    pub fn dispatch(&self, content: &str, session: &Session) -> Option<Result<String, RelayError>> {
        let trimmed = content.trim();
        let rest = trimmed.strip_prefix('/')?;
        let (name, arg) = rest.split_once(' ')?;
        let handler = self.registry.get(name)?;
        Some(handler.execute(session, arg.trim()))
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("use", UseCommand);
    registry.register("model", ModelCommand);

    CommandDispatcher::new(Arc::new(registry))
}
