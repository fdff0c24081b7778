#![forbid(unsafe_code)]

//! Indicator widget: an icon, a short text and an optional tooltip, shown
//! in the header of the bar.
//!
//! The text node follows both `title` and `data`, whichever was written
//! last. The tooltip node carries the `disabled` class while the `tooltip`
//! attribute is falsy.

use std::rc::Rc;

use debugbar_core::{CssNamespace, Dict, Node, Value};
use debugbar_runtime::{ClassDescriptor, Widget, WidgetClass};

use crate::icon_observer;

/// Attributes recognised by [`Indicator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorAttr {
    Icon,
    Title,
    Tooltip,
    Data,
}

impl IndicatorAttr {
    pub const ALL: [IndicatorAttr; 4] = [
        IndicatorAttr::Icon,
        IndicatorAttr::Title,
        IndicatorAttr::Tooltip,
        IndicatorAttr::Data,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IndicatorAttr::Icon => "icon",
            IndicatorAttr::Title => "title",
            IndicatorAttr::Tooltip => "tooltip",
            IndicatorAttr::Data => "data",
        }
    }
}

impl AsRef<str> for IndicatorAttr {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

thread_local! {
    static INDICATOR_CLASS: Rc<WidgetClass> = Indicator::class_in(&CssNamespace::default());
}

#[derive(Debug, Clone)]
pub struct Indicator {
    widget: Widget,
}

impl Indicator {
    /// The indicator class under the default namespace (one per thread).
    #[must_use]
    pub fn class() -> Rc<WidgetClass> {
        INDICATOR_CLASS.with(Rc::clone)
    }

    #[must_use]
    pub fn class_in(ns: &CssNamespace) -> Rc<WidgetClass> {
        let render_ns = ns.clone();
        WidgetClass::root().extend(
            ClassDescriptor::new("Indicator")
                .tag_name("span")
                .class_name(ns.class("indicator"))
                .render(move |widget, _| render(widget, &render_ns)),
        )
    }

    #[must_use]
    pub fn extend(descriptor: ClassDescriptor) -> Rc<WidgetClass> {
        Self::class().extend(descriptor)
    }

    #[must_use]
    pub fn new(options: Dict) -> Self {
        Self {
            widget: Self::class().instantiate(options),
        }
    }

    /// Construct from `class`, which should be an indicator class or a
    /// subclass of one; part accessors return `None` otherwise.
    #[must_use]
    pub fn of_class(class: &Rc<WidgetClass>, options: Dict) -> Self {
        Self {
            widget: class.instantiate(options),
        }
    }

    #[must_use]
    pub fn with_namespace(ns: &CssNamespace, options: Dict) -> Self {
        Self {
            widget: Self::class_in(ns).instantiate(options),
        }
    }

    #[must_use]
    pub fn from_widget(widget: Widget) -> Option<Self> {
        widget.part("tooltip").map(|_| Self { widget })
    }

    #[must_use]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    #[must_use]
    pub fn element(&self) -> &Node {
        self.widget.element()
    }

    #[must_use]
    pub fn icon_node(&self) -> Option<Node> {
        self.widget.part("icon")
    }

    #[must_use]
    pub fn text_node(&self) -> Option<Node> {
        self.widget.part("text")
    }

    #[must_use]
    pub fn tooltip_node(&self) -> Option<Node> {
        self.widget.part("tooltip")
    }

    pub fn set_title(&self, title: impl Into<Value>) {
        self.widget.set(IndicatorAttr::Title, title);
    }

    pub fn set_data(&self, data: impl Into<Value>) {
        self.widget.set(IndicatorAttr::Data, data);
    }

    pub fn set_icon(&self, icon: impl Into<Value>) {
        self.widget.set(IndicatorAttr::Icon, icon);
    }

    /// Set the tooltip text; a falsy value disables the tooltip.
    pub fn set_tooltip(&self, tooltip: impl Into<Value>) {
        self.widget.set(IndicatorAttr::Tooltip, tooltip);
    }
}

fn render(widget: &Widget, ns: &CssNamespace) {
    let root = widget.element();

    let icon = root.append_child(&Node::element("i"));
    widget.insert_part("icon", &icon);
    widget.bind(IndicatorAttr::Icon, icon_observer(ns.clone(), icon));

    let text = root.append_child(&Node::element("span"));
    text.set_class_name(&ns.class("text"));
    widget.insert_part("text", &text);
    widget.bind_text([IndicatorAttr::Title, IndicatorAttr::Data], &text);

    let tooltip = root.append_child(&Node::element("span"));
    tooltip.set_class_name(&ns.class("tooltip disabled"));
    widget.insert_part("tooltip", &tooltip);
    let disabled = ns.class("disabled");
    widget.bind(IndicatorAttr::Tooltip, move |_, value| {
        if value.is_truthy() {
            tooltip.set_text(&value.display_string());
            tooltip.remove_class(&disabled);
        } else {
            tooltip.add_class(&disabled);
        }
    });
}
