#![forbid(unsafe_code)]

//! Widget instances.
//!
//! A [`Widget`] owns one [`AttributeStore`] and one root [`Node`]. It is a
//! cheap `Rc` handle: clones share the same instance.
//!
//! # Construction
//!
//! [`Widget::new`] runs, synchronously and in order:
//!
//! 1. create the root node from the class's tag and class list;
//! 2. copy the class defaults into a fresh store;
//! 3. run the resolved `initialize` with the caller's options (default:
//!    `set_many(options)`);
//! 4. run the resolved `render` (default: nothing).
//!
//! # Observers
//!
//! Observers receive the widget explicitly, so they never need to capture
//! it. Capturing a strong `Widget` inside one of its own observers creates
//! a reference cycle; capture a [`WeakWidget`] instead when that is needed.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use debugbar_core::{Dict, Node, Value, WidgetHandle};

use crate::attributes::{AttributeStore, Observer};
use crate::class::WidgetClass;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique widget identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

struct WidgetInner {
    id: WidgetId,
    class: Rc<WidgetClass>,
    element: Node,
    store: RefCell<AttributeStore<Widget>>,
    parts: RefCell<AHashMap<String, Node>>,
    this: Weak<WidgetInner>,
}

/// Handle to a widget instance.
#[derive(Clone)]
pub struct Widget {
    inner: Rc<WidgetInner>,
}

/// Non-owning widget handle.
#[derive(Clone)]
pub struct WeakWidget {
    inner: Weak<WidgetInner>,
}

impl WeakWidget {
    #[must_use]
    pub fn upgrade(&self) -> Option<Widget> {
        self.inner.upgrade().map(|inner| Widget { inner })
    }
}

impl fmt::Debug for WeakWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(widget) => f.debug_tuple("WeakWidget").field(&widget.id()).finish(),
            None => f.write_str("WeakWidget(<dropped>)"),
        }
    }
}

impl Widget {
    /// Construct an instance of `class` (see the module docs for the
    /// sequence). Never fails: options are passed through as given.
    pub fn new(class: &Rc<WidgetClass>, options: Dict) -> Self {
        let id = WidgetId::next();
        let element = Node::element(class.tag_name());
        if let Some(class_name) = class.class_name() {
            element.set_class_name(&class_name);
        }
        let store = AttributeStore::with_values(class.defaults());

        let inner = Rc::new_cyclic(|this| WidgetInner {
            id,
            class: Rc::clone(class),
            element,
            store: RefCell::new(store),
            parts: RefCell::new(AHashMap::new()),
            this: this.clone(),
        });
        let widget = Self { inner };

        let span = tracing::debug_span!(
            "widget.construct",
            widget_id = id.get(),
            class = %class.name(),
            options = options.len()
        );
        let _guard = span.enter();

        class.run_initialize(&widget, options);
        class.run_render(&widget);
        tracing::trace!(message = "widget.rendered", widget_id = id.get());

        widget
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.inner.id
    }

    /// Class this widget was built from.
    #[must_use]
    pub fn class(&self) -> &Rc<WidgetClass> {
        &self.inner.class
    }

    /// Root node, created at construction.
    #[must_use]
    pub fn element(&self) -> &Node {
        &self.inner.element
    }

    /// Whether both handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Widget) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakWidget {
        WeakWidget {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// A non-owning reference to this widget, storable as an attribute of
    /// another widget.
    #[must_use]
    pub fn as_value(&self) -> Value {
        let weak: Weak<dyn WidgetHandle> = Rc::downgrade(&self.inner) as Weak<dyn WidgetHandle>;
        Value::widget(weak)
    }

    // ── Attributes ───────────────────────────────────────────────────

    /// Attribute value, `Null` when unset.
    #[must_use]
    pub fn get(&self, name: impl AsRef<str>) -> Value {
        self.inner.store.borrow().get(name.as_ref())
    }

    /// Borrow an attribute without cloning it. The closure sees `None` when
    /// the attribute was never set.
    ///
    /// # Panics
    ///
    /// Panics if the closure writes to this widget (re-entrant borrow).
    pub fn with_attribute<R>(&self, name: impl AsRef<str>, f: impl FnOnce(Option<&Value>) -> R) -> R {
        f(self.inner.store.borrow().get_ref(name.as_ref()))
    }

    /// Whether the attribute holds a non-null value.
    #[must_use]
    pub fn has(&self, name: impl AsRef<str>) -> bool {
        self.inner.store.borrow().has(name.as_ref())
    }

    /// Store `value` and notify the attribute's observers in registration
    /// order. Observers may write again; nested writes complete before this
    /// call returns.
    pub fn set(&self, name: impl AsRef<str>, value: impl Into<Value>) {
        let name = name.as_ref();
        let notification = self.inner.store.borrow_mut().set(name, value.into());
        tracing::trace!(
            message = "widget.set",
            widget_id = self.inner.id.get(),
            attribute = name,
            observers = notification.len()
        );
        notification.dispatch(self);
    }

    /// Apply every pair of `values` in order, each with [`set`](Self::set)
    /// semantics.
    pub fn set_many(&self, values: Dict) {
        for (name, value) in values {
            self.set(name, value);
        }
    }

    /// Sorted copy of the current attributes.
    #[must_use]
    pub fn attributes(&self) -> Dict {
        self.inner.store.borrow().snapshot()
    }

    /// Register `observer` for `name`. If the attribute currently holds a
    /// non-null value the observer is called once, right away, with it.
    pub fn bind(&self, name: impl AsRef<str>, observer: impl Fn(&Widget, &Value) + 'static) {
        self.bind_observer(name, Rc::new(observer));
    }

    /// [`bind`](Self::bind) with a shared observer; binding the same one
    /// twice registers it twice.
    pub fn bind_observer(&self, name: impl AsRef<str>, observer: Observer<Widget>) {
        let name = name.as_ref();
        let replay = self.inner.store.borrow_mut().bind(name, observer);
        tracing::trace!(
            message = "widget.bind",
            widget_id = self.inner.id.get(),
            attribute = name,
            replay = !replay.is_empty()
        );
        replay.dispatch(self);
    }

    /// Bind one observer to several attributes, each independently.
    pub fn bind_many<I>(&self, names: I, observer: impl Fn(&Widget, &Value) + 'static)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let observer: Observer<Widget> = Rc::new(observer);
        for name in names {
            self.bind_observer(name, Rc::clone(&observer));
        }
    }

    /// Keep `node`'s text equal to the attribute(s), rendering falsy values
    /// as empty text.
    pub fn bind_text<I>(&self, names: I, node: &Node)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let node = node.clone();
        self.bind_many(names, move |_, value| node.set_text(&value.text_or_empty()));
    }

    // ── Parts ────────────────────────────────────────────────────────

    /// Remember a node created during render under `name`.
    pub fn insert_part(&self, name: impl Into<String>, node: &Node) {
        self.inner
            .parts
            .borrow_mut()
            .insert(name.into(), node.clone());
    }

    /// Node previously stored with [`insert_part`](Self::insert_part).
    #[must_use]
    pub fn part(&self, name: &str) -> Option<Node> {
        self.inner.parts.borrow().get(name).cloned()
    }

    // ── Methods ──────────────────────────────────────────────────────

    /// Call a custom method resolved through the class chain.
    pub fn call(&self, name: &str, args: &[Value]) -> Option<Value> {
        let class = Rc::clone(&self.inner.class);
        let result = class.run_method(self, name, args);
        if result.is_none() {
            tracing::debug!(
                message = "widget.method_missing",
                widget_id = self.inner.id.get(),
                method = name
            );
        }
        result
    }

    /// Markup of the root node's subtree.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.inner.element.to_html()
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.inner.id)
            .field("class", &self.inner.class.name())
            .field("attributes", &self.attributes())
            .finish()
    }
}

impl WidgetHandle for WidgetInner {
    fn id(&self) -> u64 {
        self.id.get()
    }

    fn element(&self) -> Node {
        self.element.clone()
    }

    fn attribute(&self, name: &str) -> Value {
        self.store.borrow().get(name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.store.borrow().has(name)
    }

    fn set_attribute(&self, name: &str, value: Value) {
        if let Some(inner) = self.this.upgrade() {
            Widget { inner }.set(name, value);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
