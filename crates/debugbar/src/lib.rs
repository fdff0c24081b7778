#![forbid(unsafe_code)]

//! Debug bar widget layer, public facade.
//!
//! Re-exports the core value model, the widget runtime and the stock widgets,
//! and adds [`Environment`]: one resolved CSS namespace and storage backend
//! shared by the widgets a host creates.

pub mod config;
pub mod environment;

pub use config::DebugBarConfig;
pub use environment::Environment;

pub use debugbar_core as core;
pub use debugbar_runtime as runtime;
pub use debugbar_widgets as widgets;

pub use debugbar_core::dict;

pub mod prelude {
    pub use crate::{DebugBarConfig, Environment};
    pub use debugbar_core::{
        CoreError, CssNamespace, Dict, KeyValueStore, MemoryStorage, Node, Value, css_class,
        dict, get_dict_value,
    };
    pub use debugbar_runtime::{ClassDescriptor, Super, Widget, WidgetClass};
    pub use debugbar_widgets::{Indicator, IndicatorAttr, Tab, TabAttr};
}
