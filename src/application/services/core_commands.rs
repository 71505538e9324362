//! Commands owned by the bot itself: help and extension lifecycle

use crate::domain::entities::{CapabilityRegistry, Command, LifecycleOp};

/// Built-in commands registered under the core owner
pub fn core_commands() -> Vec<Command> {
    vec![
        Command::new("help")
            .with_description("Show help message")
            .with_usage("help [command]")
            .with_handler(|ctx| Ok(help_text(ctx.registry, ctx.prefix, ctx.args.first().map(String::as_str)))),
        lifecycle(LifecycleOp::Load, "Loads the specified extension"),
        lifecycle(LifecycleOp::Unload, "Unloads the specified extension"),
        lifecycle(LifecycleOp::Reload, "Reloads the specified extension"),
        Command::new(LifecycleOp::List.command_name())
            .with_description("Lists known extensions and their state")
            .with_lifecycle(LifecycleOp::List)
            .hidden()
            .gated(),
    ]
}

fn lifecycle(op: LifecycleOp, description: &str) -> Command {
    Command::new(op.command_name())
        .with_description(description)
        .with_usage(format!("{} <extension>", op.command_name()))
        .with_lifecycle(op)
        .hidden()
        .gated()
}

/// Help listing of visible commands, or the detail of one of them
pub fn help_text(registry: &CapabilityRegistry, prefix: &str, command: Option<&str>) -> String {
    if let Some(name) = command {
        return match registry.resolve(name).filter(|cmd| !cmd.hidden) {
            Some(cmd) => {
                let mut help = format!(
                    "{}{} - {}",
                    prefix,
                    cmd.name,
                    cmd.description.as_deref().unwrap_or("No description")
                );
                if !cmd.aliases.is_empty() {
                    help.push_str(&format!("\nAliases: {}", cmd.aliases.join(", ")));
                }
                if let Some(usage) = &cmd.usage {
                    help.push_str(&format!("\nUsage: {}{}", prefix, usage));
                }
                help
            }
            None => format!("Command {}{} not found", prefix, name),
        };
    }

    let mut help = "Available commands:\n".to_string();
    for cmd in registry.visible() {
        help.push_str(&format!(
            "  {}{} - {}\n",
            prefix,
            cmd.name,
            cmd.description.as_deref().unwrap_or("")
        ));
    }
    help
}
