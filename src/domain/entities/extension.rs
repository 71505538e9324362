use std::fmt;

/// Lifecycle state of an extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtensionState {
    #[default]
    Unloaded,
    Loaded,
    /// The last load or reload resolved the extension but its setup failed
    FailedLoad,
}

impl ExtensionState {
    pub fn as_str(&self) -> &str {
        match self {
            ExtensionState::Unloaded => "unloaded",
            ExtensionState::Loaded => "loaded",
            ExtensionState::FailedLoad => "failed",
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ExtensionState::Loaded)
    }
}

impl fmt::Display for ExtensionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
