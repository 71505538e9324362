//! Configuration management

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use crate::application::errors::ConfigError;

/// Configuration handle shared between the runtime and the authorization gate
pub type SharedConfig = Arc<RwLock<Config>>;

/// Bot configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Extensions auto-loaded on ready, in order
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub owner_id: String,
    #[serde(default = "default_prefix")]
    pub command_prefix: String,
    #[serde(default)]
    pub token: String,
}

fn default_prefix() -> String {
    "/".to_string()
}

/// Owner ids are platform snowflakes; accept them quoted or bare.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Int(i64),
        UInt(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Int(n) => n.to_string(),
        Id::UInt(n) => n.to_string(),
    })
}

/// On-disk encoding, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec!["commands.utility".to_string()],
            owner_id: String::new(),
            command_prefix: default_prefix(),
            token: String::new(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;

        Self::parse(&content, Format::of(&path))
    }

    fn parse(content: &str, format: Format) -> Result<Self, ConfigError> {
        match format {
            Format::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e))),
            Format::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e))),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Format::Yaml)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Format::Json)
    }

    /// Write the config back in the format its path implies
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match Format::of(path) {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Parse(e.to_string()))?,
            Format::Yaml => self.to_yaml()?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `BOT_TOKEN`, `BOT_PREFIX` and `BOT_OWNER_ID` overrides
    pub fn with_env(mut self) -> Self {
        if let Ok(token) = std::env::var("BOT_TOKEN") {
            self.token = token;
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            self.command_prefix = prefix;
        }

        if let Ok(owner) = std::env::var("BOT_OWNER_ID") {
            self.owner_id = owner;
        }

        self
    }

    pub fn load_env() -> Self {
        Config::default().with_env()
    }

    /// Exactly one owner and a usable prefix are required to run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner_id.trim().is_empty() {
            return Err(ConfigError::MissingField("owner_id".to_string()));
        }
        if self.command_prefix.is_empty() || self.command_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue(format!(
                "command_prefix {:?}",
                self.command_prefix
            )));
        }
        Ok(())
    }

    pub fn is_owner(&self, user_id: &str) -> bool {
        !self.owner_id.is_empty() && self.owner_id == user_id
    }

    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}
