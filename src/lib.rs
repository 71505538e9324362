//! extbot - a chat bot whose command modules can be loaded, unloaded and
//! reloaded while it runs.

pub mod domain;
pub mod application;
pub mod extensions;
pub mod infrastructure;
