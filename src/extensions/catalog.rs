//! Extension catalog - resolves identifiers to extension factories

use std::collections::BTreeMap;
use std::sync::Arc;
use super::trait_def::Extension;

/// Builds a fresh extension instance
pub type ExtensionFactory = Arc<dyn Fn() -> Box<dyn Extension> + Send + Sync>;

/// Compile-time set of extensions the bot knows how to build
#[derive(Default, Clone)]
pub struct ExtensionCatalog {
    factories: BTreeMap<String, ExtensionFactory>,
}

impl ExtensionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `id`, replacing any earlier one
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Extension> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Arc::new(factory));
    }

    pub fn with<F>(mut self, id: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Extension> + Send + Sync + 'static,
    {
        self.register(id, factory);
        self
    }

    /// Instantiate the extension behind `id`
    pub fn instantiate(&self, id: &str) -> Option<Box<dyn Extension>> {
        self.factories.get(id).map(|factory| factory())
    }

    /// Known identifiers, sorted
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}
