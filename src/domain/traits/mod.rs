//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod reply;

pub use bot::{Bot, BotInfo, Incoming};
pub use reply::{ChatReply, ReplySink};
