//! User-visible replies for lifecycle outcomes

use crate::application::errors::{LoadError, ReloadError, UnloadError};
use crate::domain::entities::ExtensionState;

const OK: &str = "\u{2705}";
const FAIL: &str = "\u{274c}";

pub fn load_reply(name: &str, result: &Result<(), LoadError>) -> String {
    match result {
        Ok(()) => format!("{} Extension '{}' loaded successfully!", OK, name),
        Err(e) => load_failure(name, e),
    }
}

pub fn unload_reply(name: &str, result: &Result<(), UnloadError>) -> String {
    match result {
        Ok(()) => format!("{} Extension '{}' unloaded successfully!", OK, name),
        Err(e) => unload_failure(name, e),
    }
}

pub fn reload_reply(name: &str, result: &Result<(), ReloadError>) -> String {
    match result {
        Ok(()) => format!("{} Extension '{}' reloaded successfully!", OK, name),
        Err(ReloadError::Unload(e)) => unload_failure(name, e),
        Err(ReloadError::Load(e)) => load_failure(name, e),
    }
}

/// One `<id>: <state>` line per extension
pub fn extensions_reply(known: &[(String, ExtensionState)]) -> String {
    if known.is_empty() {
        return "No extensions known".to_string();
    }
    known
        .iter()
        .map(|(id, state)| format!("{}: {}", id, state))
        .collect::<Vec<_>>()
        .join("\n")
}

fn load_failure(name: &str, error: &LoadError) -> String {
    match error {
        LoadError::NotFound(_) => format!("{} Extension '{}' could not be found!", FAIL, name),
        LoadError::AlreadyLoaded(_) => format!("{} Extension '{}' already loaded!", FAIL, name),
        LoadError::SetupFailed { .. } => format!("{} Extension '{}' failed during setup!", FAIL, name),
    }
}

fn unload_failure(name: &str, error: &UnloadError) -> String {
    match error {
        UnloadError::NotLoaded(_) => format!("{} Extension '{}' was not loaded!", FAIL, name),
    }
}
