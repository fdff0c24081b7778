#![forbid(unsafe_code)]

//! Retained node tree.
//!
//! [`Node`] is the visual-node collaborator widgets render into: an
//! element/text tree held entirely in memory. It covers the handful of
//! operations the widget layer needs (create, set and toggle classes, set
//! attributes, append, empty, set text) plus read-back for tests and
//! [`Node::to_html`] for hosts that inject markup.
//!
//! # Ownership
//!
//! `Node` is a cheap `Rc` handle. A parent owns its children; a child keeps
//! only a weak link back. Appending a node that already has a parent moves
//! it, the way a document tree does.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

enum NodeKind {
    Element {
        tag: String,
        classes: Vec<String>,
        attributes: IndexMap<String, String>,
    },
    Text(String),
}

struct NodeData {
    kind: NodeKind,
    children: Vec<Node>,
    parent: Weak<RefCell<NodeData>>,
}

/// Handle to an element or text node.
#[derive(Clone)]
pub struct Node {
    inner: Rc<RefCell<NodeData>>,
}

impl Node {
    fn from_kind(kind: NodeKind) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeData {
                kind,
                children: Vec::new(),
                parent: Weak::new(),
            })),
        }
    }

    /// Create a detached element.
    #[must_use]
    pub fn element(tag: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Element {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: IndexMap::new(),
        })
    }

    /// Create a detached text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Text(content.into()))
    }

    /// Whether both handles point at the same node.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Element tag, `None` for text nodes.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.inner.borrow().kind, NodeKind::Text(_))
    }

    // ── Classes ──────────────────────────────────────────────────────

    /// Replace the whole class list. Whitespace separates tokens.
    pub fn set_class_name(&self, class_name: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.inner.borrow_mut().kind {
            classes.clear();
            for token in class_name.split_whitespace() {
                if !classes.iter().any(|c| c == token) {
                    classes.push(token.to_string());
                }
            }
        }
    }

    /// Space-joined class list (empty for text nodes).
    #[must_use]
    pub fn class_name(&self) -> String {
        match &self.inner.borrow().kind {
            NodeKind::Element { classes, .. } => classes.join(" "),
            NodeKind::Text(_) => String::new(),
        }
    }

    /// Add one or more whitespace-separated classes; existing ones are kept.
    pub fn add_class(&self, class_name: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.inner.borrow_mut().kind {
            for token in class_name.split_whitespace() {
                if !classes.iter().any(|c| c == token) {
                    classes.push(token.to_string());
                }
            }
        }
    }

    /// Remove one or more whitespace-separated classes. Absent ones are ignored.
    pub fn remove_class(&self, class_name: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.inner.borrow_mut().kind {
            for token in class_name.split_whitespace() {
                classes.retain(|c| c != token);
            }
        }
    }

    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        match &self.inner.borrow().kind {
            NodeKind::Element { classes, .. } => classes.iter().any(|c| c == class_name),
            NodeKind::Text(_) => false,
        }
    }

    // ── Attributes ───────────────────────────────────────────────────

    /// Set an attribute. `class` is routed to the class list.
    pub fn set_attribute(&self, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(value);
            return;
        }
        if let NodeKind::Element { attributes, .. } = &mut self.inner.borrow_mut().kind {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            return match &self.inner.borrow().kind {
                NodeKind::Element { .. } => Some(self.class_name()),
                NodeKind::Text(_) => None,
            };
        }
        match &self.inner.borrow().kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).cloned(),
            NodeKind::Text(_) => None,
        }
    }

    pub fn remove_attribute(&self, name: &str) {
        if name == "class" {
            self.set_class_name("");
            return;
        }
        if let NodeKind::Element { attributes, .. } = &mut self.inner.borrow_mut().kind {
            attributes.shift_remove(name);
        }
    }

    // ── Tree ─────────────────────────────────────────────────────────

    /// Append `child` as the last child, detaching it from any previous
    /// parent. Returns the appended node.
    ///
    /// Appending a node to itself or to one of its own descendants is
    /// ignored.
    pub fn append_child(&self, child: &Node) -> Node {
        if self.ptr_eq(child) || child.contains(self) {
            return child.clone();
        }
        child.detach();
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(child.clone());
        child.clone()
    }

    /// Remove this node from its parent, if any.
    pub fn detach(&self) {
        let parent = self.inner.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.inner, &self.inner));
        }
        self.inner.borrow_mut().parent = Weak::new();
    }

    /// Remove all children.
    pub fn empty(&self) {
        let children = std::mem::take(&mut self.inner.borrow_mut().children);
        for child in children {
            child.inner.borrow_mut().parent = Weak::new();
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<Node> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Node { inner })
    }

    #[must_use]
    pub fn children(&self) -> Vec<Node> {
        self.inner.borrow().children.clone()
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    /// Whether `other` is this node or one of its descendants.
    #[must_use]
    pub fn contains(&self, other: &Node) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.inner.borrow().children.iter().any(|c| c.contains(other))
    }

    // ── Text ─────────────────────────────────────────────────────────

    /// Replace the node's content with `text`.
    ///
    /// Elements drop their children and receive a single text node (none if
    /// `text` is empty); text nodes overwrite their content.
    pub fn set_text(&self, text: &str) {
        if let NodeKind::Text(content) = &mut self.inner.borrow_mut().kind {
            *content = text.to_string();
            return;
        }
        self.empty();
        if !text.is_empty() {
            self.append_child(&Node::text(text));
        }
    }

    /// Concatenated text of this node and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        let data = self.inner.borrow();
        if let NodeKind::Text(content) = &data.kind {
            out.push_str(content);
        }
        for child in &data.children {
            child.collect_text(out);
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// First descendant (depth-first, excluding `self`) carrying `class_name`.
    #[must_use]
    pub fn find_by_class(&self, class_name: &str) -> Option<Node> {
        for child in self.children() {
            if child.has_class(class_name) {
                return Some(child);
            }
            if let Some(found) = child.find_by_class(class_name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants carrying `class_name`, in document order.
    #[must_use]
    pub fn find_all_by_class(&self, class_name: &str) -> Vec<Node> {
        let mut out = Vec::new();
        self.collect_by_class(class_name, &mut out);
        out
    }

    fn collect_by_class(&self, class_name: &str, out: &mut Vec<Node>) {
        for child in self.children() {
            if child.has_class(class_name) {
                out.push(child.clone());
            }
            child.collect_by_class(class_name, out);
        }
    }

    // ── Serialization ────────────────────────────────────────────────

    /// Serialize the subtree as HTML markup.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let data = self.inner.borrow();
        match &data.kind {
            NodeKind::Text(content) => escape_into(content, out),
            NodeKind::Element {
                tag,
                classes,
                attributes,
            } => {
                out.push('<');
                out.push_str(tag);
                if !classes.is_empty() {
                    out.push_str(" class=\"");
                    escape_into(&classes.join(" "), out);
                    out.push('"');
                }
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, out);
                    out.push('"');
                }
                out.push('>');
                for child in &data.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        match &data.kind {
            NodeKind::Text(content) => f.debug_tuple("Text").field(content).finish(),
            NodeKind::Element { tag, classes, .. } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("classes", classes)
                .field("children", &data.children.len())
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
