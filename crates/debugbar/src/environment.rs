#![forbid(unsafe_code)]

//! Resolved environment shared by the widgets of one debug bar.
//!
//! Holds the CSS namespace, the storage backend (the host's store or the
//! null shim) and the widget classes built for that namespace. Settings are
//! JSON-encoded under `settings_prefix + key`.

use std::fmt;
use std::rc::Rc;

use debugbar_core::{CssNamespace, Dict, KeyValueStore, Result, Value, resolve_storage};
use debugbar_runtime::WidgetClass;
use debugbar_widgets::{Indicator, Tab};

use crate::config::DebugBarConfig;

pub struct Environment {
    namespace: CssNamespace,
    storage: Rc<dyn KeyValueStore>,
    settings_prefix: String,
    tab_class: Rc<WidgetClass>,
    indicator_class: Rc<WidgetClass>,
}

impl Environment {
    #[must_use]
    pub fn new(config: DebugBarConfig) -> Self {
        let DebugBarConfig {
            namespace,
            storage,
            settings_prefix,
        } = config;
        let storage = resolve_storage(storage);
        tracing::debug!(
            message = "environment.ready",
            namespace = namespace.prefix(),
            settings_prefix = %settings_prefix
        );
        Self {
            tab_class: Tab::class_in(&namespace),
            indicator_class: Indicator::class_in(&namespace),
            namespace,
            storage,
            settings_prefix,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &CssNamespace {
        &self.namespace
    }

    /// Prefix `cls` with this environment's namespace.
    #[must_use]
    pub fn css_class(&self, cls: &str) -> String {
        self.namespace.class(cls)
    }

    #[must_use]
    pub fn storage(&self) -> &Rc<dyn KeyValueStore> {
        &self.storage
    }

    #[must_use]
    pub fn tab_class(&self) -> &Rc<WidgetClass> {
        &self.tab_class
    }

    #[must_use]
    pub fn indicator_class(&self) -> &Rc<WidgetClass> {
        &self.indicator_class
    }

    /// Construct a tab under this environment's namespace.
    #[must_use]
    pub fn tab(&self, options: Dict) -> Tab {
        Tab::of_class(&self.tab_class, options)
    }

    /// Construct an indicator under this environment's namespace.
    #[must_use]
    pub fn indicator(&self, options: Dict) -> Indicator {
        Indicator::of_class(&self.indicator_class, options)
    }

    fn setting_key(&self, key: &str) -> String {
        format!("{}{key}", self.settings_prefix)
    }

    /// Persist `value` under `key`.
    ///
    /// Fails only for values without a JSON form (widget references,
    /// non-finite floats).
    pub fn save_setting(&self, key: &str, value: &Value) -> Result<()> {
        let encoded = serde_json::to_string(&value.to_json()?)?;
        self.storage.set_item(&self.setting_key(key), &encoded);
        tracing::trace!(message = "setting.saved", key, bytes = encoded.len());
        Ok(())
    }

    /// Read back a setting. Missing or unreadable entries yield `Null`.
    #[must_use]
    pub fn load_setting(&self, key: &str) -> Value {
        let Some(raw) = self.storage.get_item(&self.setting_key(key)) else {
            return Value::Null;
        };
        match Value::from_json_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(message = "setting.decode_failed", key, %error);
                Value::Null
            }
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(DebugBarConfig::default())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("namespace", &self.namespace.prefix())
            .field("settings_prefix", &self.settings_prefix)
            .finish_non_exhaustive()
    }
}
