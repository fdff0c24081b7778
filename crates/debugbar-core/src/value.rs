#![forbid(unsafe_code)]

//! Attribute values.
//!
//! [`Value`] is the typed stand-in for whatever a widget chooses to keep in
//! its attribute store: scalars, strings, nested lists and maps, or a
//! non-owning reference to another widget.
//!
//! # Truthiness
//!
//! Several bindings only act on "present" values. A value is falsy when it is
//! `Null`, `false`, `0`, `0.0`, `NaN`, the empty string, or a widget
//! reference whose target has been dropped. Everything else is truthy,
//! including empty lists and maps.

use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::dom::Node;
use crate::error::{CoreError, Result};

/// Insertion-ordered attribute mapping.
///
/// Order matters: applying a `Dict` to a store notifies per pair, in the
/// order the pairs were inserted.
pub type Dict = IndexMap<String, Value>;

/// Build a [`Dict`] from `key => value` pairs.
///
/// ```
/// use debugbar_core::{dict, Value};
///
/// let options = dict! { "title" => "Queries", "badge" => 5 };
/// assert_eq!(options["badge"], Value::Int(5));
/// ```
#[macro_export]
macro_rules! dict {
    () => {
        $crate::value::Dict::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::value::Dict::new();
        $(
            map.insert(::std::string::String::from($key), $crate::value::Value::from($value));
        )+
        map
    }};
}

/// The view of a widget that other widgets are allowed to hold.
///
/// Implemented by the runtime's widget type. Core code (values, the `Tab`
/// panel forwarding) only needs to reach the root node and the attribute
/// accessors.
pub trait WidgetHandle {
    /// Process-unique widget id.
    fn id(&self) -> u64;

    /// Root node of the widget.
    fn element(&self) -> Node;

    /// Read an attribute (`Null` when unset).
    fn attribute(&self, name: &str) -> Value;

    /// Whether an attribute is set to a non-null value.
    fn has_attribute(&self, name: &str) -> bool;

    /// Write an attribute, notifying its observers.
    fn set_attribute(&self, name: &str, value: Value);
}

/// Non-owning reference to a widget.
///
/// Holding a `WidgetRef` never keeps the target alive. Once the target is
/// dropped, [`upgrade`](Self::upgrade) returns `None` and the reference
/// reads as falsy.
#[derive(Clone)]
pub struct WidgetRef {
    target: Weak<dyn WidgetHandle>,
}

impl WidgetRef {
    #[must_use]
    pub fn new(target: Weak<dyn WidgetHandle>) -> Self {
        Self { target }
    }

    /// Resolve the reference, if the target is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Rc<dyn WidgetHandle>> {
        self.target.upgrade()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl PartialEq for WidgetRef {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.target, &other.target)
    }
}

impl fmt::Debug for WidgetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(widget) => f.debug_tuple("WidgetRef").field(&widget.id()).finish(),
            None => f.write_str("WidgetRef(<dropped>)"),
        }
    }
}

/// A dynamically typed attribute value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absence marker. Stored explicitly, it still reads as "not set" for
    /// `has`.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(Dict),
    Widget(WidgetRef),
}

impl Value {
    /// Reference another widget without owning it.
    #[must_use]
    pub fn widget(target: Weak<dyn WidgetHandle>) -> Self {
        Self::Widget(WidgetRef::new(target))
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// See the module docs for the falsy set.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::List(_) | Self::Map(_) => true,
            Self::Widget(w) => w.is_alive(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Dict> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Resolve a widget reference.
    #[must_use]
    pub fn as_widget(&self) -> Option<Rc<dyn WidgetHandle>> {
        match self {
            Self::Widget(w) => w.upgrade(),
            _ => None,
        }
    }

    /// Member lookup on a map value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Human-readable rendering used when a value is written into a node.
    ///
    /// Integral floats drop their fraction (`5.0` → `"5"`), lists join their
    /// items with `,`, maps render as compact JSON and widget references as
    /// an empty string.
    #[must_use]
    pub fn display_string(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => format_float(*f),
            Self::Str(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(|item| match item {
                    Self::Null => String::new(),
                    other => other.display_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Self::Map(_) => self.to_json().map(|j| j.to_string()).unwrap_or_default(),
            Self::Widget(_) => String::new(),
        }
    }

    /// Text for a node bound to this value: falsy values render empty.
    #[must_use]
    pub fn text_or_empty(&self) -> String {
        if self.is_truthy() {
            self.display_string()
        } else {
            String::new()
        }
    }

    /// Convert to JSON. Widget references and non-finite floats have no
    /// JSON form.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| CoreError::unrepresentable(format!("non-finite float {f}")))?,
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(
                items.iter().map(Value::to_json).collect::<Result<Vec<_>>>()?,
            ),
            Self::Map(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), value.to_json()?);
                }
                serde_json::Value::Object(out)
            }
            Self::Widget(_) => return Err(CoreError::unrepresentable("widget reference")),
        })
    }

    /// Parse a JSON document into a value.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from(json))
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if f == 0.0 {
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{f:.0}")
    } else {
        format!("{f}")
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<Dict> for Value {
    fn from(map: Dict) -> Self {
        Self::Map(map)
    }
}

impl From<WidgetRef> for Value {
    fn from(w: WidgetRef) -> Self {
        Self::Widget(w)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
