//! Extension system for extbot
//! 
//! Extensions are compile-time units that contribute commands and event hooks.
//! The loader attaches and detaches them from the live capability registry.

pub mod bundled;
pub mod catalog;
pub mod loader;
pub mod trait_def;

pub use catalog::{ExtensionCatalog, ExtensionFactory};
pub use loader::ExtensionLoader;
pub use trait_def::Extension;
