use std::time::Duration;
use super::Message;

/// Kinds of runtime events an extension can hook into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connect,
    Ready,
    Message,
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Connect => "connect",
            EventKind::Ready => "ready",
            EventKind::Message => "message",
        }
    }
}

/// An event delivered by the runtime to registered hooks
#[derive(Debug, Clone)]
pub enum BotEvent {
    Connected { user: String, latency: Duration },
    Ready,
    Message(Message),
}

impl BotEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            BotEvent::Connected { .. } => EventKind::Connect,
            BotEvent::Ready => EventKind::Ready,
            BotEvent::Message(_) => EventKind::Message,
        }
    }
}
