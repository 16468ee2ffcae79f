use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::{diff, DiffOptions, InputError, Number};

/// Ordered object representation: keys keep their insertion order.
pub type Object = IndexMap<String, Node>;

/// The JSON data model every comparison operates on.
///
/// Object key order is preserved for deterministic diff ordering but is not
/// significant for equality; array order is.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number held as an exact decimal.
    Number(Number),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<Node>),
    /// JSON object in insertion order.
    Object(Object),
}

impl Node {
    /// Parses a JSON string into a [`Node`].
    ///
    /// ```
    /// # use jassert_core::Node;
    /// let node = Node::from_json_str("{\"hello\":\"world\"}")?;
    /// assert!(matches!(node, Node::Object(_)));
    /// # Ok::<(), jassert_core::InputError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, InputError> {
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Converts a serde JSON value into a [`Node`].
    pub fn from_json_value(value: JsonValue) -> Result<Self, InputError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => Ok(Self::Number(Number::from_json_number(num)?)),
            JsonValue::String(s) => Ok(Self::String(s)),
            JsonValue::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(Self::from_json_value(value)?);
                }
                Ok(Self::Array(items))
            }
            JsonValue::Object(map) => {
                let mut object = Object::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key, Self::from_json_value(value)?);
                }
                Ok(Self::Object(object))
            }
        }
    }

    /// Converts the node into a serde JSON value.
    ///
    /// ```
    /// # use jassert_core::Node;
    /// let node = Node::from_json_str("[1, \"two\"]")?;
    /// assert_eq!(node.to_json_value(), serde_json::json!([1, "two"]));
    /// # Ok::<(), jassert_core::InputError>(())
    /// ```
    #[must_use]
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(v) => JsonValue::Bool(*v),
            Self::Number(n) => JsonValue::Number(n.as_json_number().clone()),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Array(values) => JsonValue::Array(values.iter().map(Self::to_json_value).collect()),
            Self::Object(map) => {
                let mut object = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key.clone(), value.to_json_value());
                }
                JsonValue::Object(object)
            }
        }
    }

    /// Returns the JSON type name of this node.
    ///
    /// ```
    /// # use jassert_core::Node;
    /// assert_eq!(Node::Null.kind(), "null");
    /// assert_eq!(Node::Array(vec![]).kind(), "array");
    /// ```
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Returns the elements when this node is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the members when this node is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Semantic equality that respects [`DiffOptions`].
    ///
    /// ```
    /// # use jassert_core::{DiffOptions, Node};
    /// let lhs = Node::from_json_str("{\"a\":1,\"b\":2}")?;
    /// let rhs = Node::from_json_str("{\"b\":2,\"a\":1}")?;
    /// assert!(lhs.equals(&rhs, &DiffOptions::default()));
    /// # Ok::<(), jassert_core::InputError>(())
    /// ```
    #[must_use]
    pub fn equals(&self, other: &Self, options: &DiffOptions) -> bool {
        diff::equals(self, other, options)
    }

    /// Computes the structural diff from `self` (expected) to `other` (actual).
    ///
    /// ```
    /// # use jassert_core::{DiffOptions, Node};
    /// let lhs = Node::from_json_str("{\"a\":1}")?;
    /// let rhs = Node::from_json_str("{\"a\":2}")?;
    /// let diff = lhs.diff(&rhs, &DiffOptions::default());
    /// assert_eq!(diff.len(), 1);
    /// # Ok::<(), jassert_core::InputError>(())
    /// ```
    #[must_use]
    pub fn diff(&self, other: &Self, options: &DiffOptions) -> diff::Diff {
        diff::diff_nodes(self, other, options)
    }
}

impl TryFrom<JsonValue> for Node {
    type Error = InputError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_json_value(value).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Node {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Self::Array(value)
    }
}

impl From<Object> for Node {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
