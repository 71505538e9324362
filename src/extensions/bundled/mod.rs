//! Extensions shipped with the bot

pub mod info;
pub mod utility;

use super::{Extension, ExtensionCatalog};

pub use info::InfoExtension;
pub use utility::UtilityExtension;

/// Extension loaded on every ready event
pub const DEFAULT_EXTENSION: &str = utility::ID;

/// Catalog holding every bundled extension
pub fn bundled_catalog() -> ExtensionCatalog {
    ExtensionCatalog::new()
        .with(utility::ID, || Box::new(UtilityExtension) as Box<dyn Extension>)
        .with(info::ID, || Box::new(InfoExtension::new()) as Box<dyn Extension>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::LoadError;
    use crate::extensions::ExtensionLoader;

    #[tokio::test]
    async fn test_bundled_extensions_load_under_their_names() {
        let mut loader = ExtensionLoader::new(bundled_catalog());
        for id in [utility::ID, info::ID] {
            loader.load(id).await.unwrap();
        }
        assert_eq!(loader.registry().owner_of("ping"), Some(utility::ID));
    }

    #[tokio::test]
    async fn test_bundled_extension_under_foreign_id_is_rejected() {
        let catalog = ExtensionCatalog::new()
            .with("mod.other", || Box::new(UtilityExtension) as Box<dyn Extension>);
        let mut loader = ExtensionLoader::new(catalog);

        let err = loader.load("mod.other").await.unwrap_err();
        assert!(matches!(err, LoadError::SetupFailed { .. }));
        assert!(loader.registry().owner_of("ping").is_none());
    }
}
