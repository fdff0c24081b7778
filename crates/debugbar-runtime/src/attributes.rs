#![forbid(unsafe_code)]

//! Attribute store with change notification.
//!
//! [`AttributeStore<C>`] maps attribute names to [`Value`]s and keeps, per
//! name, an ordered list of observers. `C` is the receiving context handed to
//! every observer (for widgets: the widget itself).
//!
//! # Deferred dispatch
//!
//! Writes and binds return a [`Notification`] instead of calling observers
//! directly. The owner dispatches it after releasing any borrow of the
//! store, which is what makes re-entrant writes from inside an observer
//! legal: the nested write runs to completion (depth-first) before the
//! outer dispatch moves on to its next observer.
//!
//! # Invariants
//!
//! 1. Observers for a name are notified in registration order.
//! 2. Every write notifies, even when the new value equals the old one.
//! 3. The observer list is snapshotted at write time; observers bound while a
//!    dispatch is running are not called by that dispatch.
//! 4. Values and observers are independent: a name can have observers and no
//!    value, or a value and no observers.
//! 5. Binding the same observer twice registers it twice.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use debugbar_core::{Dict, Value};

/// Callback invoked with the receiving context and the new value.
pub type Observer<C> = Rc<dyn Fn(&C, &Value)>;

/// Pending observer calls produced by a write or a bind.
#[must_use = "observers only run when the notification is dispatched"]
pub struct Notification<C> {
    name: String,
    value: Value,
    observers: Vec<Observer<C>>,
}

impl<C> Notification<C> {
    fn none(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Value::Null,
            observers: Vec::new(),
        }
    }

    /// Attribute this notification is for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of observers that will be called.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Call every observer, in order, with `ctx` and the value.
    pub fn dispatch(self, ctx: &C) {
        for observer in &self.observers {
            observer(ctx, &self.value);
        }
    }
}

impl<C> fmt::Debug for Notification<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Named values plus per-name observer lists.
pub struct AttributeStore<C> {
    values: AHashMap<String, Value>,
    observers: AHashMap<String, Vec<Observer<C>>>,
}

impl<C> Default for AttributeStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> AttributeStore<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: AHashMap::new(),
            observers: AHashMap::new(),
        }
    }

    /// Store seeded with a copy of `defaults`. Seeding does not notify.
    #[must_use]
    pub fn with_values(defaults: Dict) -> Self {
        Self {
            values: defaults.into_iter().collect(),
            observers: AHashMap::new(),
        }
    }

    /// Store `value` under `name`, overwriting unconditionally, and return
    /// the observers to notify.
    pub fn set(&mut self, name: &str, value: Value) -> Notification<C> {
        self.values.insert(name.to_string(), value.clone());
        let observers = self.observers.get(name).cloned().unwrap_or_default();
        Notification {
            name: name.to_string(),
            value,
            observers,
        }
    }

    /// Apply each pair of `values` in order, dispatching each pair's
    /// notification before storing the next.
    ///
    /// Takes the store through its `RefCell` and releases the borrow before
    /// each dispatch, so observers may write back into the same store.
    pub fn set_many(store: &RefCell<Self>, ctx: &C, values: Dict) {
        for (name, value) in values {
            let notification = store.borrow_mut().set(&name, value);
            notification.dispatch(ctx);
        }
    }

    /// Whether `name` holds a non-null value.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| !v.is_null())
    }

    /// Stored value, or `Null` when unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        self.values.get(name).cloned().unwrap_or_default()
    }

    /// Stored value by reference; `None` when never set (a stored `Null`
    /// is `Some(&Value::Null)`).
    #[must_use]
    pub fn get_ref(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Append `observer` to `name`'s list.
    ///
    /// If `name` currently holds a non-null value, the returned notification
    /// replays that value to the new observer only.
    pub fn bind(&mut self, name: &str, observer: Observer<C>) -> Notification<C> {
        self.observers
            .entry(name.to_string())
            .or_default()
            .push(Rc::clone(&observer));
        match self.values.get(name) {
            Some(value) if !value.is_null() => Notification {
                name: name.to_string(),
                value: value.clone(),
                observers: vec![observer],
            },
            _ => Notification::none(name),
        }
    }

    /// Number of observers registered for `name`.
    #[must_use]
    pub fn observer_count(&self, name: &str) -> usize {
        self.observers.get(name).map_or(0, Vec::len)
    }

    /// Names that have a stored value (including stored `Null`).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Copy of all stored values, sorted by name.
    #[must_use]
    pub fn snapshot(&self) -> Dict {
        let mut pairs: Vec<_> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs.into_iter().collect()
    }
}

impl<C> fmt::Debug for AttributeStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observer_counts: AHashMap<&str, usize> = self
            .observers
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        f.debug_struct("AttributeStore")
            .field("values", &self.snapshot())
            .field("observers", &observer_counts)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
