//! Console adapter for development/testing

use std::time::Duration;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::{mpsc, Mutex};
use crate::domain::entities::User;
use crate::domain::traits::{Bot, BotInfo, Incoming};
use crate::application::errors::BotError;

const CHAT_ID: &str = "console";

type LineReader = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;

/// Console bot adapter for local development.
///
/// Each input line is one message from the default user. A line starting
/// with `@<id> ` is sent as user `<id>` instead.
pub struct ConsoleAdapter {
    info: BotInfo,
    user: User,
    lines: Mutex<LineReader>,
    sender: Option<mpsc::Sender<String>>,
}

impl ConsoleAdapter {
    /// Read from stdin, speaking as `user_id`
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::from_reader(user_id, BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader<R>(user_id: impl Into<String>, reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let reader: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(reader);
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "extbot".to_string(),
                username: "console".to_string(),
            },
            user: User::new(user_id),
            lines: Mutex::new(reader.lines()),
            sender: None,
        }
    }

    /// Also forward every outgoing message to `sender`
    pub fn with_sender(mut self, sender: mpsc::Sender<String>) -> Self {
        self.sender = Some(sender);
        self
    }

    fn split_sender(&self, line: &str) -> (User, String) {
        if let Some(rest) = line.strip_prefix('@') {
            if let Some((id, text)) = rest.split_once(char::is_whitespace) {
                if !id.is_empty() {
                    return (User::new(id), text.trim_start().to_string());
                }
            }
        }
        (self.user.clone(), line.to_string())
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode) as user {}", self.user.id);
        Ok(())
    }

    async fn receive(&self) -> Option<Incoming> {
        let mut lines = self.lines.lock().await;
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let (sender, text) = self.split_sender(line);
                    return Some(Incoming {
                        chat_id: CHAT_ID.to_string(),
                        sender,
                        text,
                    });
                }
                Ok(None) => return None,
                Err(e) => {
                    tracing::error!("Failed to read console input: {}", e);
                    return None;
                }
            }
        }
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        if let Some(sender) = &self.sender {
            sender
                .send(text.to_string())
                .await
                .map_err(|e| BotError::Network(format!("Console outbox closed: {}", e)))?;
        }
        Ok(uuid::Uuid::new_v4().to_string())
    }

    /// The console has no remote peer, so there is nothing to measure
    async fn latency(&self) -> Duration {
        Duration::ZERO
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sender() {
        let adapter = ConsoleAdapter::from_reader("42", &b""[..]);

        let (user, text) = adapter.split_sender("/load mod.a");
        assert_eq!(user.id, "42");
        assert_eq!(text, "/load mod.a");

        let (user, text) = adapter.split_sender("@7 /unload mod.a");
        assert_eq!(user.id, "7");
        assert_eq!(text, "/unload mod.a");

        let (user, text) = adapter.split_sender("@alone");
        assert_eq!(user.id, "42");
        assert_eq!(text, "@alone");
    }

    #[tokio::test]
    async fn test_receive_skips_blank_lines() {
        let adapter = ConsoleAdapter::from_reader("42", &b"\n  \n/ping\n@7 hi\n"[..]);

        let first = adapter.receive().await.unwrap();
        assert_eq!((first.sender.id.as_str(), first.text.as_str()), ("42", "/ping"));

        let second = adapter.receive().await.unwrap();
        assert_eq!((second.sender.id.as_str(), second.text.as_str()), ("7", "hi"));

        assert!(adapter.receive().await.is_none());
    }

    #[tokio::test]
    async fn test_latency_is_zero() {
        let adapter = ConsoleAdapter::from_reader("42", &b""[..]);
        assert_eq!(adapter.latency().await, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_send_forwards_to_outbox() {
        let (tx, mut rx) = mpsc::channel(4);
        let adapter = ConsoleAdapter::from_reader("42", &b""[..]).with_sender(tx);

        adapter.send_message(CHAT_ID, "hello").await.unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
    }
}
