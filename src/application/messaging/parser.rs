//! Message parser - Parses raw text into structured messages

use crate::domain::entities::{Message, Content, User};

/// Parses incoming text into structured Message objects
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: impl Into<String>, sender: Option<User>) -> Message {
        let text = text.into();
        let chat_id = chat_id.into();

        let content = match text.strip_prefix(self.command_prefix.as_str()) {
            Some(rest) => Self::parse_command(rest).unwrap_or(Content::Text(text)),
            None if text.trim().is_empty() => Content::Empty,
            None => Content::Text(text),
        };

        Message::new(chat_id, content).with_sender_opt(sender)
    }

    /// Split command text (prefix already removed) into name and arguments
    fn parse_command(cmd_text: &str) -> Option<Content> {
        // "/ load" is not a command
        if cmd_text.starts_with(char::is_whitespace) {
            return None;
        }

        let mut parts = cmd_text.split_whitespace();
        let name = parts.next()?.to_string();
        let args = parts.map(|s| s.to_string()).collect();

        Some(Content::Command { name, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_args() {
        let parser = MessageParser::new("/");
        let msg = parser.parse("chat", "/load  mod.a extra", Some(User::new("42")));

        assert_eq!(
            msg.content,
            Content::Command {
                name: "load".to_string(),
                args: vec!["mod.a".to_string(), "extra".to_string()],
            }
        );
        assert_eq!(msg.sender_id(), Some("42"));
        assert_eq!(msg.chat_id, "chat");
    }

    #[test]
    fn test_custom_prefix() {
        let parser = MessageParser::new("!!");
        assert!(parser.parse("c", "!!ping", None).content.is_command());
        assert_eq!(parser.parse("c", "/ping", None).content, Content::Text("/ping".to_string()));
    }

    #[test]
    fn test_not_commands() {
        let parser = MessageParser::new("/");
        assert_eq!(parser.parse("c", "/", None).content, Content::Text("/".to_string()));
        assert_eq!(parser.parse("c", "/ load x", None).content, Content::Text("/ load x".to_string()));
        assert_eq!(parser.parse("c", "hello", None).content.text(), Some("hello"));
        assert_eq!(parser.parse("c", "   ", None).content, Content::Empty);
    }
}
