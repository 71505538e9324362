use std::fmt;
use std::sync::Arc;

use super::{BotEvent, CapabilityRegistry, EventKind, Message};
use crate::application::errors::CommandError;

/// Represents a bot command
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub aliases: Vec<String>,
    pub usage: Option<String>,
    pub action: Option<CommandAction>,
    /// Left out of help listings
    pub hidden: bool,
    /// Requires the owner to invoke it
    pub gated: bool,
}

/// Command handler function type
pub type CommandHandler = Arc<dyn Fn(&CommandContext<'_>) -> Result<String, CommandError> + Send + Sync>;

/// Event hook function type
pub type HookHandler = Arc<dyn Fn(&BotEvent) + Send + Sync>;

/// What running a command does
#[derive(Clone)]
pub enum CommandAction {
    /// Extension lifecycle operation, executed by the dispatcher itself
    Lifecycle(LifecycleOp),
    Handler(CommandHandler),
}

impl fmt::Debug for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandAction::Lifecycle(op) => f.debug_tuple("Lifecycle").field(op).finish(),
            CommandAction::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// Privileged extension lifecycle operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOp {
    Load,
    Unload,
    Reload,
    List,
}

impl LifecycleOp {
    pub fn command_name(&self) -> &'static str {
        match self {
            LifecycleOp::Load => "load",
            LifecycleOp::Unload => "unload",
            LifecycleOp::Reload => "reload",
            LifecycleOp::List => "extensions",
        }
    }
}

/// Everything a handler can see about the invocation it serves
pub struct CommandContext<'a> {
    pub message: &'a Message,
    pub args: &'a [String],
    pub prefix: &'a str,
    pub registry: &'a CapabilityRegistry,
}

impl CommandContext<'_> {
    /// Arguments joined back into a single string
    pub fn rest(&self) -> String {
        self.args.join(" ")
    }
}

/// An extension's subscription to a runtime event
#[derive(Clone)]
pub struct EventHook {
    pub kind: EventKind,
    pub handler: HookHandler,
}

impl EventHook {
    pub fn new<F>(kind: EventKind, handler: F) -> Self
    where
        F: Fn(&BotEvent) + Send + Sync + 'static,
    {
        Self {
            kind,
            handler: Arc::new(handler),
        }
    }
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            aliases: Vec::new(),
            usage: None,
            action: None,
            hidden: false,
            gated: false,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&CommandContext<'_>) -> Result<String, CommandError> + Send + Sync + 'static,
    {
        self.action = Some(CommandAction::Handler(Arc::new(handler)));
        self
    }

    pub fn with_lifecycle(mut self, op: LifecycleOp) -> Self {
        self.action = Some(CommandAction::Lifecycle(op));
        self
    }

    /// Name and aliases, lowercased, as the registry indexes them
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .map(|s| s.to_lowercase())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("hidden", &self.hidden)
            .field("gated", &self.gated)
            .field("action", &self.action)
            .finish()
    }
}
