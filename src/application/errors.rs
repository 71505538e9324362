//! Application layer errors

use thiserror::Error;

/// Opaque failure raised by an extension's own setup logic
pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Capability registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command '{command}' is already registered by '{owner}'")]
    CommandConflict { command: String, owner: String },
}

/// Failure to load an extension
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Extension '{0}' could not be found")]
    NotFound(String),

    #[error("Extension '{0}' already loaded")]
    AlreadyLoaded(String),

    #[error("Extension '{name}' failed during setup: {source}")]
    SetupFailed {
        name: String,
        #[source]
        source: SetupError,
    },
}

/// Failure to unload an extension
#[derive(Error, Debug)]
pub enum UnloadError {
    #[error("Extension '{0}' was not loaded")]
    NotLoaded(String),
}

/// Failure in either half of a reload
#[derive(Error, Debug)]
pub enum ReloadError {
    #[error(transparent)]
    Unload(#[from] UnloadError),

    #[error(transparent)]
    Load(#[from] LoadError),
}
