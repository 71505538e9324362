//! Extension loader - owns the load/unload/reload state machine

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::application::errors::{LoadError, RegistryError, ReloadError, SetupError, UnloadError};
use crate::domain::entities::{CapabilityRegistry, Command, ExtensionState, CORE_OWNER};
use super::catalog::ExtensionCatalog;
use super::trait_def::Extension;

struct ExtensionRecord {
    state: ExtensionState,
    instance: Option<Box<dyn Extension>>,
}

/// Loads extensions from the catalog into the capability registry.
///
/// Lifecycle methods take `&mut self`, so whoever owns the loader is the only
/// writer and operations on one identifier never interleave.
pub struct ExtensionLoader {
    catalog: ExtensionCatalog,
    registry: CapabilityRegistry,
    records: HashMap<String, ExtensionRecord>,
}

impl ExtensionLoader {
    pub fn new(catalog: ExtensionCatalog) -> Self {
        Self {
            catalog,
            registry: CapabilityRegistry::new(),
            records: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &ExtensionCatalog {
        &self.catalog
    }

    /// Register commands owned by the bot itself rather than an extension
    pub fn register_builtin(&mut self, commands: Vec<Command>) -> Result<(), RegistryError> {
        self.registry.register(CORE_OWNER, commands, Vec::new())
    }

    pub fn state(&self, id: &str) -> ExtensionState {
        self.records
            .get(id)
            .map(|record| record.state)
            .unwrap_or_default()
    }

    /// Identifiers currently loaded, sorted
    pub fn loaded(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .records
            .iter()
            .filter(|(_, record)| record.state.is_loaded())
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Every identifier in the catalog or seen by the loader, with its state
    pub fn known(&self) -> Vec<(String, ExtensionState)> {
        let mut ids: Vec<&str> = self.catalog.ids().collect();
        ids.extend(self.records.keys().map(String::as_str));
        ids.sort_unstable();
        ids.dedup();
        ids.into_iter()
            .map(|id| (id.to_string(), self.state(id)))
            .collect()
    }

    /// Load an extension and register all of its capabilities.
    pub async fn load(&mut self, id: &str) -> Result<(), LoadError> {
        if self.state(id).is_loaded() {
            debug!("Extension '{}' is already loaded", id);
            return Err(LoadError::AlreadyLoaded(id.to_string()));
        }

        let extension = self
            .catalog
            .instantiate(id)
            .ok_or_else(|| LoadError::NotFound(id.to_string()))?;

        if extension.name() != id {
            let reason = format!("extension calls itself '{}'", extension.name());
            return Err(self.fail(id, reason.into()));
        }

        let commands = extension.commands();
        let hooks = extension.hooks();

        if let Err(e) = self.registry.check_available(&commands) {
            return Err(self.fail(id, e.into()));
        }

        if let Err(e) = extension.on_load().await {
            return Err(self.fail(id, e));
        }

        // Re-checked: setup may have awaited
        if let Err(e) = self.registry.register(id, commands, hooks) {
            extension.on_unload().await;
            return Err(self.fail(id, e.into()));
        }

        info!(
            "Loaded extension: {} ({} commands)",
            id,
            self.registry.command_names_of(id).len()
        );
        self.records.insert(
            id.to_string(),
            ExtensionRecord {
                state: ExtensionState::Loaded,
                instance: Some(extension),
            },
        );
        Ok(())
    }

    /// Unload an extension, removing every capability it registered.
    pub async fn unload(&mut self, id: &str) -> Result<(), UnloadError> {
        let instance = match self.records.get_mut(id) {
            Some(record) if record.state.is_loaded() => {
                record.state = ExtensionState::Unloaded;
                record.instance.take()
            }
            _ => return Err(UnloadError::NotLoaded(id.to_string())),
        };

        let removed = self.registry.unregister(id);
        if let Some(extension) = instance {
            extension.on_unload().await;
        }

        info!("Unloaded extension: {} ({} commands removed)", id, removed);
        Ok(())
    }

    /// Unload then load again from a fresh instance.
    pub async fn reload(&mut self, id: &str) -> Result<(), ReloadError> {
        self.unload(id).await?;
        self.load(id).await?;
        info!("Reloaded extension: {}", id);
        Ok(())
    }

    fn fail(&mut self, id: &str, source: SetupError) -> LoadError {
        warn!("Extension '{}' failed during setup: {}", id, source);
        self.records.insert(
            id.to_string(),
            ExtensionRecord {
                state: ExtensionState::FailedLoad,
                instance: None,
            },
        );
        LoadError::SetupFailed {
            name: id.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Each instance exposes `cmd<generation>` so reloads are observable.
    struct Versioned {
        generation: usize,
        fail: Arc<AtomicBool>,
        unloads: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Extension for Versioned {
        fn name(&self) -> &str {
            "mod.a"
        }

        fn commands(&self) -> Vec<Command> {
            vec![Command::new(format!("cmd{}", self.generation))
                .with_handler(|_| Ok("ok".to_string()))]
        }

        async fn on_load(&self) -> Result<(), SetupError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err("boom".into());
            }
            Ok(())
        }

        async fn on_unload(&self) {
            self.unloads.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Fixed(&'static str, &'static [&'static str]);

    #[async_trait]
    impl Extension for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn commands(&self) -> Vec<Command> {
            self.1.iter().map(|name| Command::new(*name)).collect()
        }
    }

    struct Harness {
        loader: ExtensionLoader,
        fail: Arc<AtomicBool>,
        unloads: Arc<AtomicUsize>,
    }

    fn harness() -> Harness {
        let fail = Arc::new(AtomicBool::new(false));
        let unloads = Arc::new(AtomicUsize::new(0));
        let generation = Arc::new(AtomicUsize::new(0));

        let (f, u) = (Arc::clone(&fail), Arc::clone(&unloads));
        let catalog = ExtensionCatalog::new()
            .with("mod.a", move || {
                Box::new(Versioned {
                    generation: generation.fetch_add(1, Ordering::SeqCst),
                    fail: Arc::clone(&f),
                    unloads: Arc::clone(&u),
                }) as Box<dyn Extension>
            })
            .with("mod.b", || Box::new(Fixed("mod.b", &["roll", "flip"])) as Box<dyn Extension>)
            .with("mod.clash", || Box::new(Fixed("mod.clash", &["coin", "roll"])) as Box<dyn Extension>)
            .with("mod.alias", || Box::new(Fixed("mod.b", &["dice"])) as Box<dyn Extension>);

        Harness {
            loader: ExtensionLoader::new(catalog),
            fail,
            unloads,
        }
    }

    #[tokio::test]
    async fn test_unload_before_load_is_not_loaded() {
        let mut h = harness();
        assert!(matches!(h.loader.unload("mod.a").await, Err(UnloadError::NotLoaded(_))));
        assert_eq!(h.loader.state("mod.a"), ExtensionState::Unloaded);
    }

    #[tokio::test]
    async fn test_load_registers_commands() {
        let mut h = harness();
        h.loader.load("mod.a").await.unwrap();

        assert_eq!(h.loader.state("mod.a"), ExtensionState::Loaded);
        assert_eq!(h.loader.registry().owner_of("cmd0"), Some("mod.a"));
        assert_eq!(h.loader.loaded(), vec!["mod.a"]);
    }

    #[tokio::test]
    async fn test_double_load_is_already_loaded() {
        let mut h = harness();
        h.loader.load("mod.a").await.unwrap();

        let err = h.loader.load("mod.a").await.unwrap_err();
        assert!(matches!(err, LoadError::AlreadyLoaded(ref id) if id == "mod.a"));
        assert_eq!(h.loader.registry().command_names_of("mod.a"), vec!["cmd0"]);
    }

    #[tokio::test]
    async fn test_double_unload_is_not_loaded() {
        let mut h = harness();
        h.loader.load("mod.a").await.unwrap();
        h.loader.unload("mod.a").await.unwrap();

        assert!(matches!(h.loader.unload("mod.a").await, Err(UnloadError::NotLoaded(_))));
        assert_eq!(h.loader.state("mod.a"), ExtensionState::Unloaded);
        assert!(h.loader.registry().resolve("cmd0").is_none());
        assert_eq!(h.unloads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_missing_creates_no_state() {
        let mut h = harness();
        let err = h.loader.load("mod.missing").await.unwrap_err();

        assert!(matches!(err, LoadError::NotFound(ref id) if id == "mod.missing"));
        assert!(h.loader.known().iter().all(|(id, _)| id != "mod.missing"));
    }

    #[tokio::test]
    async fn test_setup_failure_registers_nothing() {
        let mut h = harness();
        h.fail.store(true, Ordering::SeqCst);

        let err = h.loader.load("mod.a").await.unwrap_err();
        assert!(matches!(err, LoadError::SetupFailed { .. }));
        assert_eq!(h.loader.state("mod.a"), ExtensionState::FailedLoad);
        assert!(h.loader.registry().is_empty());

        h.fail.store(false, Ordering::SeqCst);
        h.loader.load("mod.a").await.unwrap();
        assert_eq!(h.loader.state("mod.a"), ExtensionState::Loaded);
    }

    #[tokio::test]
    async fn test_reload_never_loaded() {
        let mut h = harness();
        let err = h.loader.reload("mod.a").await.unwrap_err();

        assert!(matches!(err, ReloadError::Unload(UnloadError::NotLoaded(_))));
        assert_eq!(h.loader.state("mod.a"), ExtensionState::Unloaded);
    }

    #[tokio::test]
    async fn test_reload_refreshes_capabilities() {
        let mut h = harness();
        h.loader.load("mod.a").await.unwrap();
        h.loader.reload("mod.a").await.unwrap();

        assert_eq!(h.loader.state("mod.a"), ExtensionState::Loaded);
        assert!(h.loader.registry().resolve("cmd0").is_none());
        assert_eq!(h.loader.registry().owner_of("cmd1"), Some("mod.a"));
        assert_eq!(h.unloads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reload_setup_failure_detaches() {
        let mut h = harness();
        h.loader.load("mod.a").await.unwrap();
        h.fail.store(true, Ordering::SeqCst);

        let err = h.loader.reload("mod.a").await.unwrap_err();
        assert!(matches!(err, ReloadError::Load(LoadError::SetupFailed { .. })));
        assert_eq!(h.loader.state("mod.a"), ExtensionState::FailedLoad);
        assert!(h.loader.registry().resolve("cmd0").is_none());
        assert!(h.loader.registry().resolve("cmd1").is_none());
        assert!(matches!(h.loader.unload("mod.a").await, Err(UnloadError::NotLoaded(_))));
    }

    #[tokio::test]
    async fn test_collision_is_setup_failure() {
        let mut h = harness();
        h.loader.load("mod.b").await.unwrap();

        let err = h.loader.load("mod.clash").await.unwrap_err();
        assert!(matches!(err, LoadError::SetupFailed { ref name, .. } if name == "mod.clash"));
        assert_eq!(h.loader.state("mod.clash"), ExtensionState::FailedLoad);
        assert!(h.loader.registry().resolve("coin").is_none());
        assert_eq!(h.loader.registry().owner_of("roll"), Some("mod.b"));
    }

    #[tokio::test]
    async fn test_name_must_match_catalog_id() {
        let mut h = harness();

        let err = h.loader.load("mod.alias").await.unwrap_err();
        assert!(matches!(err, LoadError::SetupFailed { ref name, .. } if name == "mod.alias"));
        assert_eq!(h.loader.state("mod.alias"), ExtensionState::FailedLoad);
        assert!(h.loader.registry().resolve("dice").is_none());
        assert!(h.loader.registry().is_empty());
    }

    #[tokio::test]
    async fn test_builtin_names_are_reserved() {
        let mut h = harness();
        h.loader.register_builtin(vec![Command::new("roll")]).unwrap();

        assert!(h.loader.load("mod.b").await.is_err());
        assert!(matches!(h.loader.unload(CORE_OWNER).await, Err(UnloadError::NotLoaded(_))));
        assert!(h.loader.registry().resolve("roll").is_some());
    }

    #[tokio::test]
    async fn test_known_lists_catalog_and_states() {
        let mut h = harness();
        h.loader.load("mod.b").await.unwrap();

        let known = h.loader.known();
        assert_eq!(
            known,
            vec![
                ("mod.a".to_string(), ExtensionState::Unloaded),
                ("mod.alias".to_string(), ExtensionState::Unloaded),
                ("mod.b".to_string(), ExtensionState::Loaded),
                ("mod.clash".to_string(), ExtensionState::Unloaded),
            ]
        );
    }
}
