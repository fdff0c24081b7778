#![forbid(unsafe_code)]

//! Widget runtime: bound attributes, widget classes and the construction
//! lifecycle.
//!
//! - [`AttributeStore`]: named values with ordered, replay-on-bind observers.
//! - [`Widget`]: one store plus one root node, built by
//!   initialize → render.
//! - [`WidgetClass`]: overridable tag, class list, defaults and hooks, with
//!   unlimited subclassing and access to inherited behaviour via [`Super`].
//!
//! # Example
//!
//! ```rust
//! use debugbar_core::{dict, Node, Value};
//! use debugbar_runtime::{ClassDescriptor, WidgetClass};
//!
//! let counter = WidgetClass::base().extend(
//!     ClassDescriptor::new("Counter")
//!         .defaults(dict! { "count" => 0 })
//!         .render(|widget, _| {
//!             let label = widget.element().append_child(&Node::element("span"));
//!             widget.bind("count", move |_, value| label.set_text(&value.display_string()));
//!         }),
//! );
//!
//! let widget = counter.instantiate(dict! {});
//! assert_eq!(widget.element().text_content(), "0");
//! widget.set("count", 5);
//! assert_eq!(widget.element().text_content(), "5");
//! assert_eq!(widget.get("count"), Value::Int(5));
//! ```

pub mod attributes;
pub mod class;
pub mod widget;

pub use attributes::{AttributeStore, Notification, Observer};
pub use class::{ClassDescriptor, InitializeHook, MethodHook, RenderHook, Super, WidgetClass};
pub use widget::{WeakWidget, Widget, WidgetId};
