use std::time::Duration;
use async_trait::async_trait;
use crate::domain::entities::User;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Open the platform session
    async fn start(&self) -> Result<(), BotError>;

    /// Wait for the next inbound text; `None` once the session has ended
    async fn receive(&self) -> Option<Incoming>;

    /// Send a message to a chat
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError>;

    /// Round-trip latency to the platform
    async fn latency(&self) -> Duration;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Raw text as delivered by an adapter, before prefix parsing
#[derive(Debug, Clone)]
pub struct Incoming {
    pub chat_id: String,
    pub sender: User,
    pub text: String,
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
