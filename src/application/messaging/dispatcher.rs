//! Command dispatcher - Routes commands to handlers

use tracing::{debug, warn};

use crate::application::errors::{BotError, CommandError, RegistryError};
use crate::application::services::{core_commands, AuthorizationGate};
use crate::domain::entities::{BotEvent, CommandAction, CommandContext, Content, LifecycleOp, Message};
use crate::domain::traits::ReplySink;
use crate::extensions::ExtensionLoader;
use super::replies;

/// What happened to one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// One reply was sent with this text
    Replied(String),
    /// Gated command from a non-owner; nothing ran and nothing was sent
    Suppressed,
    /// No command by this name; left to the runtime's default handling
    Unknown(String),
    /// Not a command
    Ignored,
}

/// Routes parsed invocations through the authorization gate to handlers
pub struct CommandDispatcher {
    loader: ExtensionLoader,
    gate: AuthorizationGate,
    prefix: String,
}

impl CommandDispatcher {
    /// Takes ownership of the loader and registers the core commands on it
    pub fn new(
        mut loader: ExtensionLoader,
        gate: AuthorizationGate,
        prefix: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        loader.register_builtin(core_commands())?;
        Ok(Self {
            loader,
            gate,
            prefix: prefix.into(),
        })
    }

    pub fn loader(&self) -> &ExtensionLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut ExtensionLoader {
        &mut self.loader
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Dispatch one message; at most one reply goes through `reply`.
    pub async fn dispatch(
        &mut self,
        message: &Message,
        reply: &dyn ReplySink,
    ) -> Result<DispatchOutcome, BotError> {
        let Content::Command { name, args } = &message.content else {
            return Ok(DispatchOutcome::Ignored);
        };

        let (gated, action) = match self.loader.registry().resolve(name) {
            Some(command) => (command.gated, command.action.clone()),
            None => {
                debug!("Unknown command: {}", name);
                return Ok(DispatchOutcome::Unknown(name.clone()));
            }
        };

        if gated && !self.gate.authorize_sender(message.sender.as_ref()) {
            warn!(
                "Suppressed {}{} from unauthorized sender {}",
                self.prefix,
                name,
                message.sender_id().unwrap_or("<unknown>")
            );
            return Ok(DispatchOutcome::Suppressed);
        }

        let response = match action {
            Some(CommandAction::Lifecycle(op)) => self.run_lifecycle(op, args).await,
            Some(CommandAction::Handler(handler)) => {
                let ctx = CommandContext {
                    message,
                    args,
                    prefix: &self.prefix,
                    registry: self.loader.registry(),
                };
                match handler(&ctx) {
                    Ok(response) => response,
                    Err(e) => format!("Error: {}", e),
                }
            }
            None => format!("Command {} not implemented", name),
        };

        reply.send(&response).await?;
        Ok(DispatchOutcome::Replied(response))
    }

    /// Fire every hook registered for the event's kind
    pub fn emit(&self, event: &BotEvent) {
        let hooks = self.loader.registry().hooks_for(event.kind());
        debug!("Emitting {} event to {} hooks", event.kind().as_str(), hooks.len());
        for hook in hooks {
            hook(event);
        }
    }

    async fn run_lifecycle(&mut self, op: LifecycleOp, args: &[String]) -> String {
        match op {
            LifecycleOp::List => replies::extensions_reply(&self.loader.known()),
            LifecycleOp::Load => match self.target(op, args) {
                Ok(extension) => {
                    let result = self.loader.load(extension).await;
                    replies::load_reply(extension, &result)
                }
                Err(usage) => usage,
            },
            LifecycleOp::Unload => match self.target(op, args) {
                Ok(extension) => {
                    let result = self.loader.unload(extension).await;
                    replies::unload_reply(extension, &result)
                }
                Err(usage) => usage,
            },
            LifecycleOp::Reload => match self.target(op, args) {
                Ok(extension) => {
                    let result = self.loader.reload(extension).await;
                    replies::reload_reply(extension, &result)
                }
                Err(usage) => usage,
            },
        }
    }

    /// The extension argument, or the usage reply when it is missing
    fn target<'a>(&self, op: LifecycleOp, args: &'a [String]) -> Result<&'a str, String> {
        args.first().map(String::as_str).ok_or_else(|| {
            let usage = CommandError::InvalidArgs(format!(
                "usage: {}{} <extension>",
                self.prefix,
                op.command_name()
            ));
            format!("Error: {}", usage)
        })
    }
}
