//! Classified assertion failures.
//!
//! Every assertion either passes or yields exactly one [`Failure`]. A failure
//! carries its [`FailureKind`], an optional pointer into the compared
//! document, optional expected/actual payloads, and a rendered message.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::{Node, Pointer, RenderConfig};

/// The closed taxonomy of assertion failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The actual structure was absent.
    Null,
    /// The actual structure was present where none was expected.
    NotNull,
    /// A location in the expected document is missing from the actual one.
    Missing,
    /// A location in the actual document is absent from the expected one.
    Unexpected,
    /// A location holds a different value than expected.
    Invalid,
    /// Two values compared equal in a not-equal assertion.
    UnexpectedlyEqual,
    /// An array did not contain the expected element.
    NotContaining,
    /// An array contained an unexpected element.
    Containing,
    /// An array lacked some of the expected elements.
    NotContainingAll,
    /// An array contained none of the expected elements.
    NotContainingAny,
    /// An array contained some of the unexpected elements.
    ContainingSome,
    /// A property held a value it was asserted not to hold.
    UnexpectedProperty,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::NotNull => "not_null",
            Self::Missing => "missing",
            Self::Unexpected => "unexpected",
            Self::Invalid => "invalid",
            Self::UnexpectedlyEqual => "unexpectedly_equal",
            Self::NotContaining => "not_containing",
            Self::Containing => "containing",
            Self::NotContainingAll => "not_containing_all",
            Self::NotContainingAny => "not_containing_any",
            Self::ContainingSome => "containing_some",
            Self::UnexpectedProperty => "unexpected_property",
        };
        f.write_str(name)
    }
}

/// A single classified assertion failure.
///
/// `expected` and `actual` are only populated for [`FailureKind::Null`],
/// [`FailureKind::NotNull`], [`FailureKind::Invalid`] and
/// [`FailureKind::UnexpectedlyEqual`].
///
/// ```
/// # use jassert_core::{Failure, FailureKind, Pointer};
/// let failure = Failure::missing(Pointer::parse("/x/1")?);
/// assert_eq!(failure.kind(), FailureKind::Missing);
/// assert_eq!(failure.to_string(), "Missing: /x/1");
/// assert!(failure.expected().is_none());
/// # Ok::<(), jassert_core::PointerError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct Failure {
    kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Pointer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<Node>,
    message: String,
}

impl Failure {
    fn new(kind: FailureKind, message: String) -> Self {
        Self { kind, path: None, expected: None, actual: None, message }
    }

    fn with_path(mut self, path: Pointer) -> Self {
        self.path = Some(path);
        self
    }

    fn with_expected(mut self, expected: Option<Node>) -> Self {
        self.expected = expected;
        self
    }

    fn with_actual(mut self, actual: Option<Node>) -> Self {
        self.actual = actual;
        self
    }

    /// The actual structure was absent while `expected` was present.
    #[must_use]
    pub fn null(expected: Node) -> Self {
        Self::new(FailureKind::Null, "Json structure is null.".to_owned()).with_expected(Some(expected))
    }

    /// The actual structure was present while none was expected.
    #[must_use]
    pub fn not_null(actual: Node) -> Self {
        Self::new(FailureKind::NotNull, "Json structure is not null.".to_owned()).with_actual(Some(actual))
    }

    /// Something the expected document holds at `path` is missing.
    #[must_use]
    pub fn missing(path: Pointer) -> Self {
        Self::new(FailureKind::Missing, format!("Missing: {path}")).with_path(path)
    }

    /// The actual document holds something at `path` that was not expected.
    #[must_use]
    pub fn unexpected(path: Pointer) -> Self {
        Self::new(FailureKind::Unexpected, format!("Unexpected: {path}")).with_path(path)
    }

    /// The value at `path` differs.
    #[must_use]
    pub fn invalid(path: Pointer, expected: Option<Node>, actual: Option<Node>) -> Self {
        Self::new(FailureKind::Invalid, format!("Invalid: {path}"))
            .with_path(path)
            .with_expected(expected)
            .with_actual(actual)
    }

    /// The values were expected to differ but compared equal.
    #[must_use]
    pub fn unexpectedly_equal(actual: Option<Node>) -> Self {
        let message = format!("Expected not equal but was: {}", value_text(actual.as_ref()));
        Self::new(FailureKind::UnexpectedlyEqual, message).with_actual(actual)
    }

    /// `element` is not part of `array`.
    #[must_use]
    pub fn not_containing(element: &Node, array: Option<&[Node]>) -> Self {
        let message = format!(
            "The expected element: {element} is not part of the array: {}",
            array_text(array)
        );
        Self::new(FailureKind::NotContaining, message)
    }

    /// `element` is part of `array` although it should not be.
    #[must_use]
    pub fn containing(element: &Node, array: Option<&[Node]>) -> Self {
        let message =
            format!("The unexpected element: {element} is part of the array: {}", array_text(array));
        Self::new(FailureKind::Containing, message)
    }

    /// The `missing` elements are not part of `array`.
    #[must_use]
    pub fn not_containing_all(missing: &[Node], array: Option<&[Node]>) -> Self {
        let message = format!(
            "The expected elements: {} are not part of the array: {}",
            array_text(Some(missing)),
            array_text(array)
        );
        Self::new(FailureKind::NotContainingAll, message)
    }

    /// None of `expecteds` is part of `array`.
    #[must_use]
    pub fn not_containing_any(expecteds: &[Node], array: Option<&[Node]>) -> Self {
        let message = format!(
            "None of the expected elements: {} is part of the array: {}",
            array_text(Some(expecteds)),
            array_text(array)
        );
        Self::new(FailureKind::NotContainingAny, message)
    }

    /// The `found` elements are part of `array` although none should be.
    #[must_use]
    pub fn containing_some(found: &[Node], array: Option<&[Node]>) -> Self {
        let message = format!(
            "The unexpected elements: {} are part of the array: {}",
            array_text(Some(found)),
            array_text(array)
        );
        Self::new(FailureKind::ContainingSome, message)
    }

    /// `value` sits at `path` although it should not.
    #[must_use]
    pub fn unexpected_property(value: &Node, path: Pointer) -> Self {
        let message = format!("Unexpected value: {value} at: {path}");
        Self::new(FailureKind::UnexpectedProperty, message).with_path(path)
    }

    /// Returns the failure kind.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the pointer the failure refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Pointer> {
        self.path.as_ref()
    }

    /// Returns the expected payload, if any.
    #[must_use]
    pub fn expected(&self) -> Option<&Node> {
        self.expected.as_ref()
    }

    /// Returns the actual payload, if any.
    #[must_use]
    pub fn actual(&self) -> Option<&Node> {
        self.actual.as_ref()
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the message followed by `expected:`/`actual:` lines for the
    /// payloads that are present.
    ///
    /// ```
    /// # use jassert_core::{Failure, Node, Pointer, RenderConfig};
    /// let failure = Failure::invalid(Pointer::parse("/a")?, Some(Node::from(2)), Some(Node::from(1)));
    /// assert_eq!(
    ///     failure.render(&RenderConfig::default()),
    ///     "Invalid: /a\nexpected: 2\nactual: 1\n"
    /// );
    /// # Ok::<(), jassert_core::PointerError>(())
    /// ```
    #[must_use]
    pub fn render(&self, config: &RenderConfig) -> String {
        let mut output = String::with_capacity(self.message.len() + 1);
        output.push_str(&self.message);
        output.push('\n');
        if let Some(expected) = &self.expected {
            output.push_str(&config.red(&format!("expected: {expected}")));
            output.push('\n');
        }
        if let Some(actual) = &self.actual {
            output.push_str(&config.green(&format!("actual: {actual}")));
            output.push('\n');
        }
        output
    }
}

fn value_text(value: Option<&Node>) -> String {
    value.map_or_else(|| "null".to_owned(), Node::to_string)
}

fn array_text(array: Option<&[Node]>) -> String {
    match array {
        Some(items) => {
            let parts: Vec<String> = items.iter().map(Node::to_string).collect();
            format!("[{}]", parts.join(","))
        }
        None => "null".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(text: &str) -> Node {
        Node::from_json_str(text).unwrap()
    }

    #[test]
    fn null_and_not_null_messages() {
        let null = Failure::null(node("{}"));
        assert_eq!(null.message(), "Json structure is null.");
        assert_eq!(null.expected(), Some(&node("{}")));
        assert!(null.actual().is_none());

        let not_null = Failure::not_null(node("[]"));
        assert_eq!(not_null.message(), "Json structure is not null.");
        assert_eq!(not_null.actual(), Some(&node("[]")));
        assert!(not_null.expected().is_none());
    }

    #[test]
    fn unexpectedly_equal_renders_absent_as_null() {
        let failure = Failure::unexpectedly_equal(None);
        assert_eq!(failure.message(), "Expected not equal but was: null");
        let failure = Failure::unexpectedly_equal(Some(node("{\"a\":1}")));
        assert_eq!(failure.message(), "Expected not equal but was: {\"a\":1}");
    }

    #[test]
    fn containment_messages_render_compact_json() {
        let array = node("[1,\"x\"]");
        let items = array.as_array();
        assert_eq!(
            Failure::not_containing(&node("2"), items).message(),
            "The expected element: 2 is not part of the array: [1,\"x\"]"
        );
        assert_eq!(
            Failure::containing(&node("1"), items).message(),
            "The unexpected element: 1 is part of the array: [1,\"x\"]"
        );
        assert_eq!(
            Failure::not_containing(&Node::Null, None).message(),
            "The expected element: null is not part of the array: null"
        );
    }

    #[test]
    fn set_messages_list_elements() {
        let actual = node("[1,2]");
        assert_eq!(
            Failure::not_containing_all(&[node("3"), node("4")], actual.as_array()).message(),
            "The expected elements: [3,4] are not part of the array: [1,2]"
        );
        assert_eq!(
            Failure::not_containing_any(&[node("3")], Some(&[][..])).message(),
            "None of the expected elements: [3] is part of the array: []"
        );
        assert_eq!(
            Failure::containing_some(&[node("2")], actual.as_array()).message(),
            "The unexpected elements: [2] are part of the array: [1,2]"
        );
    }

    #[test]
    fn unexpected_property_carries_path_only() {
        let failure = Failure::unexpected_property(&node("1"), Pointer::parse("/a/b").unwrap());
        assert_eq!(failure.message(), "Unexpected value: 1 at: /a/b");
        assert_eq!(failure.path().map(ToString::to_string).as_deref(), Some("/a/b"));
        assert!(failure.expected().is_none() && failure.actual().is_none());
    }

    #[test]
    fn serializes_populated_fields_only() {
        let failure = Failure::missing(Pointer::parse("/a").unwrap());
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "missing", "path": "/a", "message": "Missing: /a"}));
    }

    #[test]
    fn render_colors_payload_lines() {
        let failure = Failure::invalid(Pointer::root(), Some(node("1")), Some(node("2")));
        let rendered = failure.render(&RenderConfig::default().with_color(true));
        assert!(rendered.starts_with("Invalid: \n"));
        assert!(rendered.contains("\u{1b}[31mexpected: 1\u{1b}[0m"));
        assert!(rendered.contains("\u{1b}[32mactual: 2\u{1b}[0m"));
    }
}
