//! Application services - Business logic orchestration

pub mod auth_service;
pub mod core_commands;

pub use auth_service::AuthorizationGate;
pub use core_commands::{core_commands, help_text};
