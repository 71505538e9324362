//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod event;
pub mod extension;
pub mod registry;

pub use user::User;
pub use message::{Message, Content};
pub use command::{Command, CommandAction, CommandContext, CommandHandler, HookHandler, EventHook, LifecycleOp};
pub use event::{BotEvent, EventKind};
pub use extension::ExtensionState;
pub use registry::{CapabilityRegistry, CORE_OWNER};
