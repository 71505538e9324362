use std::collections::HashMap;
use std::sync::Arc;

use super::{Command, EventHook, EventKind, HookHandler};
use crate::application::errors::RegistryError;

/// Owner of the built-in commands; never an extension
pub const CORE_OWNER: &str = "core";

struct Entry {
    owner: String,
    command: Arc<Command>,
}

struct RegisteredHook {
    owner: String,
    hook: EventHook,
}

/// Live mapping from command name to handler, reflecting loaded extensions
#[derive(Default)]
pub struct CapabilityRegistry {
    /// Keyed by lowercased name and every alias
    commands: HashMap<String, Entry>,
    hooks: Vec<RegisteredHook>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every command and hook of `owner`, or nothing at all.
    pub fn register(
        &mut self,
        owner: &str,
        commands: Vec<Command>,
        hooks: Vec<EventHook>,
    ) -> Result<(), RegistryError> {
        self.check_available(&commands)?;

        for command in commands {
            let command = Arc::new(command);
            for key in command.keys() {
                self.commands.insert(key, Entry {
                    owner: owner.to_string(),
                    command: Arc::clone(&command),
                });
            }
        }
        self.hooks.extend(hooks.into_iter().map(|hook| RegisteredHook {
            owner: owner.to_string(),
            hook,
        }));
        Ok(())
    }

    /// Fails on the first name or alias that is already taken, including
    /// duplicates inside `commands` itself.
    pub fn check_available(&self, commands: &[Command]) -> Result<(), RegistryError> {
        let mut batch: HashMap<String, &str> = HashMap::new();
        for command in commands {
            for key in command.keys() {
                if let Some(entry) = self.commands.get(&key) {
                    return Err(RegistryError::CommandConflict {
                        command: key,
                        owner: entry.owner.clone(),
                    });
                }
                if let Some(first) = batch.insert(key.clone(), &command.name) {
                    return Err(RegistryError::CommandConflict {
                        command: key,
                        owner: first.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Remove everything registered by `owner`, returning how many commands went.
    pub fn unregister(&mut self, owner: &str) -> usize {
        let before = self.command_names_of(owner).len();
        self.commands.retain(|_, entry| entry.owner != owner);
        self.hooks.retain(|h| h.owner != owner);
        before
    }

    pub fn resolve(&self, input: &str) -> Option<&Command> {
        self.commands
            .get(&input.to_lowercase())
            .map(|entry| entry.command.as_ref())
    }

    pub fn owner_of(&self, input: &str) -> Option<&str> {
        self.commands
            .get(&input.to_lowercase())
            .map(|entry| entry.owner.as_str())
    }

    /// Primary command names registered by `owner`, sorted
    pub fn command_names_of(&self, owner: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .primary_entries()
            .filter(|entry| entry.owner == owner)
            .map(|entry| entry.command.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Commands shown in help, sorted by name
    pub fn visible(&self) -> Vec<&Command> {
        let mut commands: Vec<&Command> = self
            .primary_entries()
            .map(|entry| entry.command.as_ref())
            .filter(|c| !c.hidden)
            .collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    pub fn hooks_for(&self, kind: EventKind) -> Vec<HookHandler> {
        self.hooks
            .iter()
            .filter(|h| h.hook.kind == kind)
            .map(|h| Arc::clone(&h.hook.handler))
            .collect()
    }

    pub fn hook_count(&self, owner: &str) -> usize {
        self.hooks.iter().filter(|h| h.owner == owner).count()
    }

    /// Number of distinct commands
    pub fn len(&self) -> usize {
        self.primary_entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn primary_entries(&self) -> impl Iterator<Item = &Entry> {
        self.commands
            .iter()
            .filter(|(key, entry)| **key == entry.command.name.to_lowercase())
            .map(|(_, entry)| entry)
    }
}
