//! Conversion of caller arguments into [`Node`] values.
//!
//! Assertions accept already-parsed nodes, JSON text, or `serde_json`
//! values interchangeably through [`JsonInput`]; `None` stands for an
//! absent structure.

use std::borrow::Cow;

use serde_json::Value as JsonValue;

use crate::{InputError, Node};

/// Anything an assertion can take as a JSON argument.
///
/// ```
/// # use jassert_core::{JsonInput, Node};
/// let parsed = "[1,2]".into_node()?.unwrap();
/// assert_eq!(parsed.as_ref(), &Node::from_json_str("[1,2]")?);
/// assert!(None::<&str>.into_node()?.is_none());
/// assert!("{".into_node().is_err());
/// # Ok::<(), jassert_core::InputError>(())
/// ```
pub trait JsonInput<'a> {
    /// Converts the argument, borrowing when it already is a [`Node`].
    fn into_node(self) -> Result<Option<Cow<'a, Node>>, InputError>;
}

impl<'a> JsonInput<'a> for &'a Node {
    fn into_node(self) -> Result<Option<Cow<'a, Node>>, InputError> {
        Ok(Some(Cow::Borrowed(self)))
    }
}

impl<'a> JsonInput<'a> for Node {
    fn into_node(self) -> Result<Option<Cow<'a, Node>>, InputError> {
        Ok(Some(Cow::Owned(self)))
    }
}

impl<'a> JsonInput<'a> for &str {
    fn into_node(self) -> Result<Option<Cow<'a, Node>>, InputError> {
        Node::from_json_str(self).map(|node| Some(Cow::Owned(node)))
    }
}

impl<'a> JsonInput<'a> for &String {
    fn into_node(self) -> Result<Option<Cow<'a, Node>>, InputError> {
        self.as_str().into_node()
    }
}

impl<'a> JsonInput<'a> for String {
    fn into_node(self) -> Result<Option<Cow<'a, Node>>, InputError> {
        self.as_str().into_node()
    }
}

impl<'a> JsonInput<'a> for &JsonValue {
    fn into_node(self) -> Result<Option<Cow<'a, Node>>, InputError> {
        Node::from_json_value(self.clone()).map(|node| Some(Cow::Owned(node)))
    }
}

impl<'a> JsonInput<'a> for JsonValue {
    fn into_node(self) -> Result<Option<Cow<'a, Node>>, InputError> {
        Node::from_json_value(self).map(|node| Some(Cow::Owned(node)))
    }
}

impl<'a, T> JsonInput<'a> for Option<T>
where
    T: JsonInput<'a>,
{
    fn into_node(self) -> Result<Option<Cow<'a, Node>>, InputError> {
        match self {
            Some(inner) => inner.into_node(),
            None => Ok(None),
        }
    }
}

/// Narrows a converted argument to its array elements.
pub(crate) fn into_array<'a>(
    node: Option<Cow<'a, Node>>,
    role: &'static str,
) -> Result<Option<Cow<'a, [Node]>>, InputError> {
    match node {
        None => Ok(None),
        Some(Cow::Borrowed(Node::Array(items))) => Ok(Some(Cow::Borrowed(items.as_slice()))),
        Some(Cow::Owned(Node::Array(items))) => Ok(Some(Cow::Owned(items))),
        Some(other) => Err(InputError::NotAnArray { role, found: other.kind() }),
    }
}

/// Narrows a converted argument to an object or array root.
pub(crate) fn into_structure<'a>(
    node: Option<Cow<'a, Node>>,
    role: &'static str,
) -> Result<Option<Cow<'a, Node>>, InputError> {
    match node {
        Some(node) if !matches!(*node, Node::Object(_) | Node::Array(_)) => {
            Err(InputError::NotAStructure { role, found: node.kind() })
        }
        other => Ok(other),
    }
}
