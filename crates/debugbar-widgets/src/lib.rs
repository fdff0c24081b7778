#![forbid(unsafe_code)]

//! Stock debug bar widgets.
//!
//! - [`Tab`]: a label (icon, title, badge) for the tab strip plus a panel
//!   hosting another widget.
//! - [`Indicator`]: icon, text and tooltip for single values shown in the
//!   always-visible part of the bar.
//!
//! Both are widget classes derived from the runtime base class; the typed
//! wrappers only add named accessors over the attribute store.

pub mod indicator;
pub mod tab;

pub use indicator::{Indicator, IndicatorAttr};
pub use tab::{Tab, TabAttr};

use debugbar_core::{CssNamespace, Node, Value};
use debugbar_runtime::Widget;

/// Observer keeping an `<i>` node's classes in sync with an icon name:
/// `fa fa-<icon>` (namespaced) for a truthy name, no classes otherwise.
pub(crate) fn icon_observer(ns: CssNamespace, icon: Node) -> impl Fn(&Widget, &Value) + 'static {
    move |_, value| {
        if value.is_truthy() {
            let name = value.display_string();
            icon.set_class_name(&ns.class(&format!("fa fa-{name}")));
        } else {
            icon.set_class_name("");
        }
    }
}
