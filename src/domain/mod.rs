//! Domain layer - Core business objects and the abstractions around them
//! 
//! This layer contains:
//! - Entities: Core business objects (User, Message, Command, CapabilityRegistry)
//! - Traits: Abstractions for infrastructure (Bot, ReplySink)

pub mod entities;
pub mod traits;
