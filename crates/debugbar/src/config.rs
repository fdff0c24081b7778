#![forbid(unsafe_code)]

use std::fmt;
use std::rc::Rc;

use debugbar_core::{CssNamespace, KeyValueStore};

/// Key prefix for persisted settings unless configured otherwise.
pub const DEFAULT_SETTINGS_PREFIX: &str = "phpdebugbar-";

/// Host-provided configuration for an [`Environment`](crate::Environment).
#[derive(Clone)]
pub struct DebugBarConfig {
    pub namespace: CssNamespace,
    pub storage: Option<Rc<dyn KeyValueStore>>,
    pub settings_prefix: String,
}

impl Default for DebugBarConfig {
    fn default() -> Self {
        Self {
            namespace: CssNamespace::default(),
            storage: None,
            settings_prefix: DEFAULT_SETTINGS_PREFIX.to_string(),
        }
    }
}

impl DebugBarConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// CSS class prefix applied to every stock widget.
    #[must_use]
    pub fn with_namespace(mut self, prefix: impl Into<String>) -> Self {
        self.namespace = CssNamespace::new(prefix);
        self
    }

    /// Persistent key-value store; without one settings are not kept.
    #[must_use]
    pub fn with_storage(mut self, storage: Rc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn with_settings_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings_prefix = prefix.into();
        self
    }
}

impl fmt::Debug for DebugBarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugBarConfig")
            .field("namespace", &self.namespace.prefix())
            .field("storage", &self.storage.is_some())
            .field("settings_prefix", &self.settings_prefix)
            .finish()
    }
}
