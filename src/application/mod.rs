//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Authorization gate and core commands
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing, dispatching, reply mapping
//! - Runtime: Event loop tying an adapter to the dispatcher

pub mod errors;
pub mod services;
pub mod messaging;
pub mod runtime;

pub use runtime::BotRuntime;
