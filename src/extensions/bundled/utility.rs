//! `commands.utility` - small everyday commands

use crate::application::errors::CommandError;
use crate::domain::entities::{Command, EventHook, EventKind};
use crate::extensions::Extension;

pub const ID: &str = "commands.utility";

pub struct UtilityExtension;

impl Extension for UtilityExtension {
    fn name(&self) -> &str {
        ID
    }

    fn commands(&self) -> Vec<Command> {
        vec![
            Command::new("ping")
                .with_description("Check that the bot is alive")
                .with_handler(|_| Ok("Pong!".to_string())),
            Command::new("echo")
                .with_description("Repeat the given text")
                .with_aliases(vec!["say".to_string()])
                .with_usage("echo <text>")
                .with_handler(|ctx| {
                    if ctx.args.is_empty() {
                        return Err(CommandError::InvalidArgs(format!("usage: {}echo <text>", ctx.prefix)));
                    }
                    Ok(ctx.rest())
                }),
            Command::new("whoami")
                .with_description("Show your user id")
                .with_handler(|ctx| {
                    Ok(ctx
                        .message
                        .sender
                        .as_ref()
                        .map(|u| format!("You are {}", u))
                        .unwrap_or_else(|| "You are anonymous".to_string()))
                }),
        ]
    }

    fn hooks(&self) -> Vec<EventHook> {
        vec![EventHook::new(EventKind::Ready, |_| {
            tracing::info!("{} is ready", ID);
        })]
    }
}
