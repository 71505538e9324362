//! `commands.info` - uptime and version

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::errors::{CommandError, SetupError};
use crate::domain::entities::Command;
use crate::extensions::Extension;

pub const ID: &str = "commands.info";

pub struct InfoExtension {
    loaded_at: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl InfoExtension {
    pub fn new() -> Self {
        Self {
            loaded_at: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for InfoExtension {
    fn default() -> Self {
        Self::new()
    }
}

fn format_uptime(secs: i64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    format!("Up for {}h {}m {}s", h, m, s)
}

#[async_trait]
impl Extension for InfoExtension {
    fn name(&self) -> &str {
        ID
    }

    fn commands(&self) -> Vec<Command> {
        let loaded_at = Arc::clone(&self.loaded_at);
        vec![
            Command::new("uptime")
                .with_description("Time since this extension was loaded")
                .with_handler(move |_| {
                    let since = *loaded_at
                        .lock()
                        .map_err(|_| CommandError::ExecutionFailed("Lock poisoned".to_string()))?;
                    let since = since
                        .ok_or_else(|| CommandError::ExecutionFailed("not loaded".to_string()))?;
                    Ok(format_uptime((Utc::now() - since).num_seconds().max(0)))
                }),
            Command::new("version")
                .with_description("Show bot version")
                .with_handler(|_| Ok(format!("extbot v{}", env!("CARGO_PKG_VERSION")))),
        ]
    }

    async fn on_load(&self) -> Result<(), SetupError> {
        let mut loaded_at = self.loaded_at.lock().map_err(|_| "Lock poisoned")?;
        *loaded_at = Some(Utc::now());
        Ok(())
    }

    async fn on_unload(&self) {
        if let Ok(mut loaded_at) = self.loaded_at.lock() {
            *loaded_at = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "Up for 0h 0m 0s");
        assert_eq!(format_uptime(3725), "Up for 1h 2m 5s");
    }

    #[tokio::test]
    async fn test_on_load_records_time() {
        let ext = InfoExtension::new();
        assert!(ext.loaded_at.lock().unwrap().is_none());
        ext.on_load().await.unwrap();
        assert!(ext.loaded_at.lock().unwrap().is_some());
        ext.on_unload().await;
        assert!(ext.loaded_at.lock().unwrap().is_none());
    }
}
