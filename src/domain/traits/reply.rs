use async_trait::async_trait;
use crate::application::errors::BotError;
use super::Bot;

/// Sends text back to the conversation an invocation came from
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), BotError>;
}

/// Reply sink bound to one chat of a bot adapter
pub struct ChatReply<'a, B: Bot> {
    bot: &'a B,
    chat_id: &'a str,
}

impl<'a, B: Bot> ChatReply<'a, B> {
    pub fn new(bot: &'a B, chat_id: &'a str) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl<B: Bot> ReplySink for ChatReply<'_, B> {
    async fn send(&self, text: &str) -> Result<(), BotError> {
        tracing::info!("Sending response to chat_id {}: {}", self.chat_id, text);
        self.bot.send_message(self.chat_id, text).await.map(|_| ())
    }
}
