#![forbid(unsafe_code)]

//! Namespaced CSS class names.
//!
//! Every class the widgets put on a node carries a fixed prefix so the debug
//! bar never collides with the host page's stylesheet.

/// Namespace used by the stock widgets.
pub const DEFAULT_NAMESPACE: &str = "phpdebugbar-";

/// Prefix a class name, or each token of a space-separated list.
///
/// A leading `.` is kept in front of the prefix so selectors stay selectors:
///
/// ```
/// use debugbar_core::css_class;
///
/// assert_eq!(css_class("tab panel", "phpdebugbar-"), "phpdebugbar-tab phpdebugbar-panel");
/// assert_eq!(css_class(".tab", "phpdebugbar-"), ".phpdebugbar-tab");
/// ```
#[must_use]
pub fn css_class(cls: &str, prefix: &str) -> String {
    if cls.contains(' ') {
        return cls
            .split(' ')
            .map(|token| prefix_token(token, prefix))
            .collect::<Vec<_>>()
            .join(" ");
    }
    prefix_token(cls, prefix)
}

fn prefix_token(token: &str, prefix: &str) -> String {
    match token.strip_prefix('.') {
        Some(rest) => format!(".{prefix}{rest}"),
        None => format!("{prefix}{token}"),
    }
}

/// [`css_class`] with the prefix already applied.
#[must_use]
pub fn make_css_class(prefix: impl Into<String>) -> impl Fn(&str) -> String {
    let ns = CssNamespace::new(prefix);
    move |cls| ns.class(cls)
}

/// A class-name prefix carried around by widgets and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssNamespace {
    prefix: String,
}

impl Default for CssNamespace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl CssNamespace {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Prefix `cls` with this namespace.
    #[must_use]
    pub fn class(&self, cls: &str) -> String {
        css_class(cls, &self.prefix)
    }
}
