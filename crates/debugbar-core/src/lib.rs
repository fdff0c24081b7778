#![forbid(unsafe_code)]

//! Core: attribute values, the node tree, CSS naming and storage collaborators.

pub mod css;
pub mod dict;
pub mod dom;
pub mod error;
pub mod logging;
pub mod storage;
pub mod value;

pub use css::{CssNamespace, DEFAULT_NAMESPACE, css_class, make_css_class};
pub use dict::{get_dict_value, get_object_size};
pub use dom::Node;
pub use error::{CoreError, Result};
pub use storage::{KeyValueStore, MemoryStorage, NullStorage, resolve_storage};
pub use value::{Dict, Value, WidgetHandle, WidgetRef};
