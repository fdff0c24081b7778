#![forbid(unsafe_code)]

//! Widget classes and subclassing.
//!
//! A [`WidgetClass`] is a set of overrides ([`ClassDescriptor`]) plus an
//! optional parent class. Every property is resolved at lookup time by
//! walking from the class towards the root and taking the first class that
//! defines it, so:
//!
//! - a property set on a subclass shadows the parent's;
//! - a property the subclass leaves alone is inherited, including changes
//!   made to the parent later through [`WidgetClass::redefine`];
//! - any class can be extended again, to any depth.
//!
//! Hooks (`initialize`, `render`, custom methods) receive a [`Super`] that
//! points at the parent of the class defining the hook, so an override can
//! run the inherited behaviour before or after its own.
//!
//! ```
//! use debugbar_core::dict;
//! use debugbar_runtime::{ClassDescriptor, WidgetClass};
//!
//! let label = WidgetClass::base().extend(
//!     ClassDescriptor::new("Label")
//!         .tag_name("span")
//!         .defaults(dict! { "text" => "?" })
//!         .render(|widget, _sup| {
//!             let node = widget.element().clone();
//!             widget.bind_text(["text"], &node);
//!         }),
//! );
//!
//! let widget = label.instantiate(dict! { "text" => "hello" });
//! assert_eq!(widget.element().text_content(), "hello");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use debugbar_core::{Dict, Value};

use crate::widget::Widget;

/// Replacement for the default `initialize` step.
pub type InitializeHook = Rc<dyn Fn(&Widget, Dict, &Super)>;

/// Replacement for the default (empty) `render` step.
pub type RenderHook = Rc<dyn Fn(&Widget, &Super)>;

/// Named custom behaviour callable through [`Widget::call`].
pub type MethodHook = Rc<dyn Fn(&Widget, &[Value], &Super) -> Value>;

/// Overrides applied by one class.
///
/// Unset fields fall through to the parent class.
#[derive(Clone, Default)]
pub struct ClassDescriptor {
    name: Option<String>,
    tag_name: Option<String>,
    class_name: Option<String>,
    defaults: Option<Dict>,
    initialize: Option<InitializeHook>,
    render: Option<RenderHook>,
    methods: AHashMap<String, MethodHook>,
}

impl ClassDescriptor {
    /// Descriptor for a class called `name` (used in logs and `Debug`).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Tag of the root node.
    #[must_use]
    pub fn tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = Some(tag.into());
        self
    }

    /// Class list of the root node.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Attribute values copied into every new instance's store. Replaces
    /// the parent's defaults as a whole.
    #[must_use]
    pub fn defaults(mut self, defaults: Dict) -> Self {
        self.defaults = Some(defaults);
        self
    }

    #[must_use]
    pub fn initialize(mut self, hook: impl Fn(&Widget, Dict, &Super) + 'static) -> Self {
        self.initialize = Some(Rc::new(hook));
        self
    }

    #[must_use]
    pub fn render(mut self, hook: impl Fn(&Widget, &Super) + 'static) -> Self {
        self.render = Some(Rc::new(hook));
        self
    }

    #[must_use]
    pub fn method(
        mut self,
        name: impl Into<String>,
        hook: impl Fn(&Widget, &[Value], &Super) -> Value + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Rc::new(hook));
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_tag_name(&mut self, tag: impl Into<String>) {
        self.tag_name = Some(tag.into());
    }

    pub fn set_class_name(&mut self, class_name: impl Into<String>) {
        self.class_name = Some(class_name.into());
    }

    pub fn set_defaults(&mut self, defaults: Dict) {
        self.defaults = Some(defaults);
    }

    pub fn set_initialize(&mut self, hook: impl Fn(&Widget, Dict, &Super) + 'static) {
        self.initialize = Some(Rc::new(hook));
    }

    pub fn set_render(&mut self, hook: impl Fn(&Widget, &Super) + 'static) {
        self.render = Some(Rc::new(hook));
    }

    pub fn set_method(
        &mut self,
        name: impl Into<String>,
        hook: impl Fn(&Widget, &[Value], &Super) -> Value + 'static,
    ) {
        self.methods.insert(name.into(), Rc::new(hook));
    }

    /// Drop an override so the property is inherited again.
    pub fn clear_render(&mut self) {
        self.render = None;
    }

    pub fn clear_initialize(&mut self) {
        self.initialize = None;
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("tag_name", &self.tag_name)
            .field("class_name", &self.class_name)
            .field("defaults", &self.defaults)
            .field("initialize", &self.initialize.is_some())
            .field("render", &self.render.is_some())
            .field("methods", &methods)
            .finish()
    }
}

thread_local! {
    static ROOT_CLASS: Rc<WidgetClass> = WidgetClass::base();
}

/// A widget type: overrides plus a parent to inherit from.
pub struct WidgetClass {
    descriptor: RefCell<ClassDescriptor>,
    parent: Option<Rc<WidgetClass>>,
}

impl WidgetClass {
    /// The shared `Widget` class every stock widget derives from (one per
    /// thread). Redefining it reaches all of its subclasses.
    #[must_use]
    pub fn root() -> Rc<Self> {
        ROOT_CLASS.with(Rc::clone)
    }

    /// A new, unshared root class.
    ///
    /// Roots render a bare `div` with no class, start with no attributes,
    /// apply construction options with `set_many` and render nothing.
    #[must_use]
    pub fn base() -> Rc<Self> {
        Rc::new(Self {
            descriptor: RefCell::new(
                ClassDescriptor::new("Widget")
                    .tag_name("div")
                    .defaults(Dict::new()),
            ),
            parent: None,
        })
    }

    /// Derive a subclass applying `descriptor` on top of `self`.
    #[must_use]
    pub fn extend(self: &Rc<Self>, descriptor: ClassDescriptor) -> Rc<Self> {
        Rc::new(Self {
            descriptor: RefCell::new(descriptor),
            parent: Some(Rc::clone(self)),
        })
    }

    /// The class this one was extended from.
    #[must_use]
    pub fn parent(&self) -> Option<&Rc<WidgetClass>> {
        self.parent.as_ref()
    }

    /// Edit this class's own overrides. Subclasses observe the change for
    /// every property they do not shadow; existing instances keep the root
    /// node and defaults they were built with.
    pub fn redefine(&self, edit: impl FnOnce(&mut ClassDescriptor)) {
        edit(&mut self.descriptor.borrow_mut());
    }

    /// Whether `self` is `ancestor` or derives from it.
    #[must_use]
    pub fn is_subclass_of(&self, ancestor: &Rc<WidgetClass>) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if std::ptr::eq(class, Rc::as_ptr(ancestor)) {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }

    /// Number of classes between `self` and its root.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent.as_deref();
        while let Some(class) = current {
            depth += 1;
            current = class.parent.as_deref();
        }
        depth
    }

    /// Build an instance.
    pub fn instantiate(self: &Rc<Self>, options: Dict) -> Widget {
        Widget::new(self, options)
    }

    // ── Resolution ───────────────────────────────────────────────────

    fn lookup<T>(&self, pick: impl Fn(&ClassDescriptor) -> Option<T>) -> Option<T> {
        let mut current = Some(self);
        while let Some(class) = current {
            if let Some(found) = pick(&class.descriptor.borrow()) {
                return Some(found);
            }
            current = class.parent.as_deref();
        }
        None
    }

    /// Like `lookup`, also reporting the parent of the defining class.
    fn lookup_hook<T>(
        &self,
        pick: impl Fn(&ClassDescriptor) -> Option<T>,
    ) -> Option<(T, Option<Rc<WidgetClass>>)> {
        let mut current = Some(self);
        while let Some(class) = current {
            let found = pick(&class.descriptor.borrow());
            if let Some(found) = found {
                return Some((found, class.parent.clone()));
            }
            current = class.parent.as_deref();
        }
        None
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.lookup(|d| d.name.clone())
            .unwrap_or_else(|| "Widget".to_string())
    }

    #[must_use]
    pub fn tag_name(&self) -> String {
        self.lookup(|d| d.tag_name.clone())
            .unwrap_or_else(|| "div".to_string())
    }

    /// Resolved root class list; `None` when no class sets a non-empty one.
    #[must_use]
    pub fn class_name(&self) -> Option<String> {
        self.lookup(|d| d.class_name.clone())
            .filter(|c| !c.is_empty())
    }

    #[must_use]
    pub fn defaults(&self) -> Dict {
        self.lookup(|d| d.defaults.clone()).unwrap_or_default()
    }

    /// Resolved custom method.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<MethodHook> {
        self.lookup(|d| d.methods.get(name).cloned())
    }

    #[must_use]
    pub fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }

    pub(crate) fn run_initialize(&self, widget: &Widget, options: Dict) {
        match self.lookup_hook(|d| d.initialize.clone()) {
            Some((hook, parent)) => hook(widget, options, &Super { class: parent }),
            None => widget.set_many(options),
        }
    }

    pub(crate) fn run_render(&self, widget: &Widget) {
        if let Some((hook, parent)) = self.lookup_hook(|d| d.render.clone()) {
            hook(widget, &Super { class: parent });
        }
    }

    pub(crate) fn run_method(&self, widget: &Widget, name: &str, args: &[Value]) -> Option<Value> {
        let (hook, parent) = self.lookup_hook(|d| d.methods.get(name).cloned())?;
        Some(hook(widget, args, &Super { class: parent }))
    }
}

impl fmt::Debug for WidgetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetClass")
            .field("name", &self.name())
            .field("tag_name", &self.tag_name())
            .field("class_name", &self.class_name())
            .field("depth", &self.depth())
            .finish()
    }
}

/// Access to the inherited implementation from inside a hook.
///
/// Points at the parent of the class that defined the running hook. Above a
/// root, `initialize` and `render` do nothing and `call` returns `None`.
pub struct Super {
    class: Option<Rc<WidgetClass>>,
}

impl Super {
    /// The class inherited behaviour is resolved from.
    #[must_use]
    pub fn class(&self) -> Option<&Rc<WidgetClass>> {
        self.class.as_ref()
    }

    /// Run the inherited `initialize`.
    pub fn initialize(&self, widget: &Widget, options: Dict) {
        if let Some(class) = &self.class {
            class.run_initialize(widget, options);
        }
    }

    /// Run the inherited `render`.
    pub fn render(&self, widget: &Widget) {
        if let Some(class) = &self.class {
            class.run_render(widget);
        }
    }

    /// Run the inherited custom method `name`.
    pub fn call(&self, widget: &Widget, name: &str, args: &[Value]) -> Option<Value> {
        self.class
            .as_ref()
            .and_then(|class| class.run_method(widget, name, args))
    }
}

impl fmt::Debug for Super {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Super")
            .field("class", &self.class.as_ref().map(|c| c.name()))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use debugbar_core::dict;
    use std::cell::RefCell;

    #[test]
    fn base_resolves_stock_properties() {
        let base = WidgetClass::base();
        assert_eq!(base.name(), "Widget");
        assert_eq!(base.tag_name(), "div");
        assert_eq!(base.class_name(), None);
        assert!(base.defaults().is_empty());
        assert!(base.parent().is_none());
        assert_eq!(base.depth(), 0);
    }

    #[test]
    fn descriptor_shadows_parent() {
        let base = WidgetClass::base();
        let span = base.extend(ClassDescriptor::new("Span").tag_name("span"));
        let boxed = span.extend(ClassDescriptor::new("Boxed").class_name("box"));

        assert_eq!(span.tag_name(), "span");
        assert_eq!(boxed.tag_name(), "span");
        assert_eq!(boxed.class_name().as_deref(), Some("box"));
        assert_eq!(boxed.name(), "Boxed");
        assert_eq!(boxed.depth(), 2);
        assert!(boxed.is_subclass_of(&base));
        assert!(boxed.is_subclass_of(&span));
        assert!(!span.is_subclass_of(&boxed));
    }

    #[test]
    fn later_parent_changes_are_inherited_unless_shadowed() {
        let base = WidgetClass::base();
        let child = base.extend(ClassDescriptor::new("Child"));
        let shadowing = base.extend(ClassDescriptor::new("Shadow").tag_name("p"));

        base.redefine(|d| d.set_tag_name("section"));
        assert_eq!(child.tag_name(), "section");
        assert_eq!(shadowing.tag_name(), "p");
    }

    #[test]
    fn empty_class_name_reads_as_none() {
        let class = WidgetClass::base().extend(ClassDescriptor::new("X").class_name(""));
        assert_eq!(class.class_name(), None);
    }

    #[test]
    fn defaults_replace_rather_than_merge() {
        let parent = WidgetClass::base()
            .extend(ClassDescriptor::new("P").defaults(dict! { "a" => 1, "b" => 2 }));
        let child = parent.extend(ClassDescriptor::new("C").defaults(dict! { "c" => 3 }));
        assert_eq!(child.defaults(), dict! { "c" => 3 });
        let plain = parent.extend(ClassDescriptor::new("Q"));
        assert_eq!(plain.defaults(), dict! { "a" => 1, "b" => 2 });
    }

    #[test]
    fn super_chain_runs_each_level_once() {
        let trail = Rc::new(RefCell::new(Vec::new()));

        let t1 = Rc::clone(&trail);
        let a = WidgetClass::base().extend(ClassDescriptor::new("A").render(move |w, sup| {
            t1.borrow_mut().push("A");
            sup.render(w);
        }));
        let t2 = Rc::clone(&trail);
        let b = a.extend(ClassDescriptor::new("B"));
        let c = b.extend(ClassDescriptor::new("C").render(move |w, sup| {
            t2.borrow_mut().push("C");
            sup.render(w);
        }));

        let _widget = c.instantiate(Dict::new());
        assert_eq!(*trail.borrow(), ["C", "A"]);
    }

    #[test]
    fn methods_resolve_through_chain_and_super() {
        let a = WidgetClass::base().extend(
            ClassDescriptor::new("A").method("greet", |_, args, _| {
                Value::from(format!("hello {}", args.first().map(Value::display_string).unwrap_or_default()))
            }),
        );
        let b = a.extend(ClassDescriptor::new("B").method("greet", |w, args, sup| {
            let inner = sup.call(w, "greet", args).unwrap_or_default();
            Value::from(format!("[{}]", inner.display_string()))
        }));

        let widget = b.instantiate(Dict::new());
        assert!(b.has_method("greet"));
        assert_eq!(
            widget.call("greet", &[Value::from("bar")]),
            Some(Value::from("[hello bar]"))
        );
        assert_eq!(widget.call("missing", &[]), None);
    }

    #[test]
    fn super_above_root_is_inert() {
        let sup = Super { class: None };
        let widget = WidgetClass::base().instantiate(Dict::new());
        sup.initialize(&widget, dict! { "a" => 1 });
        sup.render(&widget);
        assert!(!widget.has("a"));
        assert_eq!(sup.call(&widget, "x", &[]), None);
        assert!(sup.class().is_none());
    }

    #[test]
    fn root_is_shared_and_distinct_from_base() {
        assert!(Rc::ptr_eq(&WidgetClass::root(), &WidgetClass::root()));
        assert!(!Rc::ptr_eq(&WidgetClass::root(), &WidgetClass::base()));
        let sub = WidgetClass::root().extend(ClassDescriptor::new("Sub"));
        assert!(sub.is_subclass_of(&WidgetClass::root()));
        assert_eq!(WidgetClass::root().name(), "Widget");
    }

    #[test]
    fn debug_lists_resolved_properties() {
        let class = WidgetClass::base().extend(ClassDescriptor::new("Tabby").tag_name("a"));
        let dbg = format!("{class:?}");
        assert!(dbg.contains("Tabby"));
        assert!(dbg.contains("\"a\""));
    }
}
