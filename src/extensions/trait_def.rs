//! Extension trait definitions

use async_trait::async_trait;
use crate::application::errors::SetupError;
use crate::domain::entities::{Command, EventHook};

/// Core trait that every extension implements
#[async_trait]
pub trait Extension: Send + Sync {
    /// Identifier the extension is loaded under, e.g. `commands.utility`.
    /// Must equal its catalog id.
    fn name(&self) -> &str;

    /// Commands contributed while loaded
    fn commands(&self) -> Vec<Command>;

    /// Event hooks contributed while loaded
    fn hooks(&self) -> Vec<EventHook> {
        Vec::new()
    }

    /// Setup run before any capability is registered
    async fn on_load(&self) -> Result<(), SetupError> {
        Ok(())
    }

    /// Cleanup run after the capabilities are removed
    async fn on_unload(&self) {}
}
