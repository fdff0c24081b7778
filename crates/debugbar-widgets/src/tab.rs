#![forbid(unsafe_code)]

//! Tab widget.
//!
//! A tab is a label that always stays visible in the tab strip and a panel
//! that is shown when the tab is active. The panel hosts another widget.
//!
//! Attributes:
//!
//! - `title`: label text
//! - `badge`: small counter next to the title; `Null` hides it
//! - `icon`: icon name
//! - `widget`: the widget shown in the panel (held by non-owning reference)
//! - `data`: forwarded to the hosted widget's `data` attribute

use std::rc::Rc;

use debugbar_core::{CssNamespace, Dict, Node, Value};
use debugbar_runtime::{ClassDescriptor, Widget, WidgetClass};

use crate::icon_observer;

/// Attributes recognised by [`Tab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabAttr {
    Title,
    Badge,
    Icon,
    Widget,
    Data,
}

impl TabAttr {
    pub const ALL: [TabAttr; 5] = [
        TabAttr::Title,
        TabAttr::Badge,
        TabAttr::Icon,
        TabAttr::Widget,
        TabAttr::Data,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TabAttr::Title => "title",
            TabAttr::Badge => "badge",
            TabAttr::Icon => "icon",
            TabAttr::Widget => "widget",
            TabAttr::Data => "data",
        }
    }
}

impl AsRef<str> for TabAttr {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

thread_local! {
    static TAB_CLASS: Rc<WidgetClass> = Tab::class_in(&CssNamespace::default());
}

/// A tab label plus its panel.
#[derive(Debug, Clone)]
pub struct Tab {
    widget: Widget,
}

impl Tab {
    /// The tab class under the default namespace (one per thread).
    #[must_use]
    pub fn class() -> Rc<WidgetClass> {
        TAB_CLASS.with(Rc::clone)
    }

    /// Build a tab class whose class names use `ns`.
    #[must_use]
    pub fn class_in(ns: &CssNamespace) -> Rc<WidgetClass> {
        let render_ns = ns.clone();
        WidgetClass::root().extend(
            ClassDescriptor::new("Tab")
                .class_name(ns.class("panel"))
                .render(move |widget, _| render(widget, &render_ns)),
        )
    }

    /// Subclass the default tab class.
    #[must_use]
    pub fn extend(descriptor: ClassDescriptor) -> Rc<WidgetClass> {
        Self::class().extend(descriptor)
    }

    /// Construct a tab; `options` may set any [`TabAttr`].
    #[must_use]
    pub fn new(options: Dict) -> Self {
        Self {
            widget: Self::class().instantiate(options),
        }
    }

    /// Construct from `class`, which should be a tab class or a
    /// subclass of one; part accessors return `None` otherwise.
    #[must_use]
    pub fn of_class(class: &Rc<WidgetClass>, options: Dict) -> Self {
        Self {
            widget: class.instantiate(options),
        }
    }

    /// Construct a tab whose class names use `ns`.
    #[must_use]
    pub fn with_namespace(ns: &CssNamespace, options: Dict) -> Self {
        Self {
            widget: Self::class_in(ns).instantiate(options),
        }
    }

    /// Wrap a widget built from a tab class or a subclass of one.
    #[must_use]
    pub fn from_widget(widget: Widget) -> Option<Self> {
        widget.part("tab").map(|_| Self { widget })
    }

    #[must_use]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Panel node (the widget's root).
    #[must_use]
    pub fn element(&self) -> &Node {
        self.widget.element()
    }

    /// Label node for the tab strip.
    #[must_use]
    pub fn tab(&self) -> Option<Node> {
        self.widget.part("tab")
    }

    #[must_use]
    pub fn icon_node(&self) -> Option<Node> {
        self.widget.part("icon")
    }

    #[must_use]
    pub fn title_node(&self) -> Option<Node> {
        self.widget.part("title")
    }

    #[must_use]
    pub fn badge_node(&self) -> Option<Node> {
        self.widget.part("badge")
    }

    #[must_use]
    pub fn title(&self) -> Value {
        self.widget.get(TabAttr::Title)
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.widget.set(TabAttr::Title, title.into());
    }

    #[must_use]
    pub fn badge(&self) -> Value {
        self.widget.get(TabAttr::Badge)
    }

    /// Set the badge; `Null` (or `None`) hides it.
    pub fn set_badge(&self, badge: impl Into<Value>) {
        self.widget.set(TabAttr::Badge, badge);
    }

    pub fn set_icon(&self, icon: impl Into<Value>) {
        self.widget.set(TabAttr::Icon, icon);
    }

    /// Host `content` in the panel. The tab does not keep it alive.
    pub fn set_content(&self, content: &Widget) {
        self.widget.set(TabAttr::Widget, content.as_value());
    }

    pub fn set_data(&self, data: impl Into<Value>) {
        self.widget.set(TabAttr::Data, data);
    }
}

fn render(widget: &Widget, ns: &CssNamespace) {
    let tab = Node::element("a");
    tab.set_class_name(&ns.class("tab"));
    widget.insert_part("tab", &tab);

    let icon = tab.append_child(&Node::element("i"));
    widget.insert_part("icon", &icon);
    widget.bind(TabAttr::Icon, icon_observer(ns.clone(), icon));

    let title = tab.append_child(&Node::element("span"));
    title.set_class_name(&ns.class("text"));
    widget.insert_part("title", &title);
    widget.bind_text([TabAttr::Title], &title);

    let badge = tab.append_child(&Node::element("span"));
    badge.set_class_name(&ns.class("badge"));
    widget.insert_part("badge", &badge);
    let visible = ns.class("visible");
    widget.bind(TabAttr::Badge, move |_, value| {
        if value.is_null() {
            badge.remove_class(&visible);
        } else {
            badge.set_text(&value.display_string());
            badge.add_class(&visible);
        }
    });

    widget.bind(TabAttr::Widget, |tab, value| {
        let panel = tab.element();
        panel.empty();
        if let Some(content) = value.as_widget() {
            panel.append_child(&content.element());
            tracing::debug!(
                message = "tab.content",
                tab = tab.id().get(),
                content = content.id()
            );
        }
    });

    widget.bind(TabAttr::Data, |tab, data| {
        let Some(content) = tab.get(TabAttr::Widget).as_widget() else {
            return;
        };
        // A tab hosting itself would forward to itself forever.
        if content.id() == tab.id().get() {
            return;
        }
        content.set_attribute("data", data.clone());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use debugbar_core::dict;

    fn part(tab: &Tab, name: &str) -> Node {
        tab.widget().part(name).expect("tab part")
    }

    #[test]
    fn attr_names() {
        let names: Vec<_> = TabAttr::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(names, ["title", "badge", "icon", "widget", "data"]);
    }

    #[test]
    fn panel_and_label_structure() {
        let tab = Tab::new(dict! {});
        assert_eq!(tab.element().tag().as_deref(), Some("div"));
        assert_eq!(tab.element().class_name(), "phpdebugbar-panel");

        let label = part(&tab, "tab");
        assert_eq!(label.tag().as_deref(), Some("a"));
        assert_eq!(label.class_name(), "phpdebugbar-tab");
        let children = label.children();
        assert_eq!(children.len(), 3);
        assert!(children[0].ptr_eq(&part(&tab, "icon")));
        assert!(children[1].ptr_eq(&part(&tab, "title")));
        assert!(children[2].ptr_eq(&part(&tab, "badge")));
        assert!(!part(&tab, "badge").has_class("phpdebugbar-visible"));
    }

    #[test]
    fn title_binding_tracks_updates() {
        let tab = Tab::new(dict! { "title" => "Queries" });
        assert_eq!(part(&tab, "title").text_content(), "Queries");
        tab.set_title("Messages");
        assert_eq!(part(&tab, "title").text_content(), "Messages");
        assert_eq!(tab.title(), Value::from("Messages"));
    }

    #[test]
    fn badge_shows_and_hides() {
        let tab = Tab::new(dict! { "badge" => 5 });
        let badge = part(&tab, "badge");
        assert_eq!(badge.text_content(), "5");
        assert!(badge.has_class("phpdebugbar-visible"));
        assert!(badge.has_class("phpdebugbar-badge"));

        tab.set_badge(Value::Null);
        assert!(!badge.has_class("phpdebugbar-visible"));
        assert!(badge.has_class("phpdebugbar-badge"));

        tab.set_badge(12);
        assert_eq!(badge.text_content(), "12");
        assert!(badge.has_class("phpdebugbar-visible"));
    }

    #[test]
    fn zero_badge_is_visible() {
        let tab = Tab::new(dict! { "badge" => 0 });
        assert_eq!(part(&tab, "badge").text_content(), "0");
        assert!(part(&tab, "badge").has_class("phpdebugbar-visible"));
    }

    #[test]
    fn icon_classes_follow_icon_name() {
        let tab = Tab::new(dict! { "icon" => "database" });
        assert_eq!(
            part(&tab, "icon").class_name(),
            "phpdebugbar-fa phpdebugbar-fa-database"
        );
        tab.set_icon(Value::Null);
        assert_eq!(part(&tab, "icon").class_name(), "");
    }

    #[test]
    fn custom_namespace_applies_everywhere() {
        let ns = CssNamespace::new("dbg-");
        let tab = Tab::with_namespace(&ns, dict! { "badge" => 1, "icon" => "list" });
        assert_eq!(tab.element().class_name(), "dbg-panel");
        assert_eq!(part(&tab, "tab").class_name(), "dbg-tab");
        assert!(part(&tab, "badge").has_class("dbg-visible"));
        assert_eq!(part(&tab, "icon").class_name(), "dbg-fa dbg-fa-list");
    }

    #[test]
    fn class_is_shared_per_thread() {
        assert!(Rc::ptr_eq(&Tab::class(), &Tab::class()));
        let sub = Tab::extend(ClassDescriptor::new("SubTab"));
        assert!(sub.is_subclass_of(&Tab::class()));
    }

    #[test]
    fn self_hosting_tab_keeps_data_without_forwarding() {
        let tab = Tab::new(dict! {});
        tab.set_content(tab.widget());
        tab.set_data("payload");
        assert_eq!(tab.widget().get("data"), Value::from("payload"));
        assert!(tab.element().children().is_empty());
    }

    #[test]
    fn stock_classes_share_the_root_class() {
        let tab_parent = Tab::class().parent().cloned().expect("tab parent");
        let ind_parent = crate::Indicator::class()
            .parent()
            .cloned()
            .expect("indicator parent");
        assert!(Rc::ptr_eq(&tab_parent, &ind_parent));
        assert!(Tab::class().is_subclass_of(&WidgetClass::root()));
        assert!(Tab::class_in(&CssNamespace::new("x-")).is_subclass_of(&WidgetClass::root()));
    }

    #[test]
    fn from_widget_requires_tab_parts() {
        let plain = WidgetClass::base().instantiate(Dict::new());
        assert!(Tab::from_widget(plain).is_none());
        let tab = Tab::new(dict! {});
        assert!(Tab::from_widget(tab.widget().clone()).is_some());
    }
}
