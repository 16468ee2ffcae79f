//! JSON Pointer (RFC 6901) paths.
//!
//! Diff operations and failures are addressed with [`Pointer`]s, and the
//! property predicates resolve caller-supplied pointer text against a
//! document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Node, PointerError};

/// A location inside a JSON document, held as unescaped reference tokens.
///
/// The empty pointer addresses the document root.
///
/// ```
/// # use jassert_core::Pointer;
/// let pointer = Pointer::root().child_key("a/b").child_index(0);
/// assert_eq!(pointer.to_string(), "/a~1b/0");
/// assert_eq!(pointer.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pointer(Vec<String>);

impl Pointer {
    /// Creates the root pointer.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses pointer text, decoding `~1` to `/` and `~0` to `~`.
    ///
    /// ```
    /// # use jassert_core::Pointer;
    /// let pointer = Pointer::parse("/m~0n/1")?;
    /// assert_eq!(pointer.tokens(), ["m~n", "1"]);
    /// assert!(Pointer::parse("a").is_err());
    /// assert!(Pointer::parse("/bad~2").is_err());
    /// # Ok::<(), jassert_core::PointerError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self, PointerError> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = text.strip_prefix('/') else {
            return Err(PointerError::MissingLeadingSlash { pointer: text.to_owned() });
        };

        let mut tokens = Vec::new();
        let mut offset = 1;
        for raw in rest.split('/') {
            tokens.push(unescape_token(raw, text, offset)?);
            offset += raw.len() + 1;
        }
        Ok(Self(tokens))
    }

    /// Returns a new pointer extended by an object key.
    #[must_use]
    pub fn child_key<S>(&self, key: S) -> Self
    where
        S: Into<String>,
    {
        let mut tokens = self.0.clone();
        tokens.push(key.into());
        Self(tokens)
    }

    /// Returns a new pointer extended by an array index.
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        self.child_key(index.to_string())
    }

    /// Returns the unescaped tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether this is the root pointer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pushes a token in place.
    pub fn push<S>(&mut self, token: S)
    where
        S: Into<String>,
    {
        self.0.push(token.into());
    }

    /// Pops the last token off the pointer.
    ///
    /// ```
    /// # use jassert_core::Pointer;
    /// let mut pointer = Pointer::root().child_index(3);
    /// assert_eq!(pointer.pop().as_deref(), Some("3"));
    /// assert!(pointer.is_empty());
    /// ```
    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    /// Returns the pointer to the enclosing container, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        let mut tokens = self.0.clone();
        tokens.pop();
        Some(Self(tokens))
    }

    /// Resolves the pointer against a document.
    ///
    /// Object tokens are key lookups. Array tokens must be canonical decimal
    /// indices within bounds; `-` never resolves.
    ///
    /// ```
    /// # use jassert_core::{Node, Pointer};
    /// let doc = Node::from_json_str("{\"a\":[10,{\"b\":null}]}")?;
    /// let found = Pointer::parse("/a/1/b")?.resolve(&doc);
    /// assert_eq!(found, Some(&Node::Null));
    /// assert!(Pointer::parse("/a/01")?.resolve(&doc).is_none());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn resolve<'a>(&self, document: &'a Node) -> Option<&'a Node> {
        let mut current = document;
        for token in &self.0 {
            current = match current {
                Node::Object(map) => map.get(token)?,
                Node::Array(items) => items.get(parse_index(token)?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

fn unescape_token(raw: &str, pointer: &str, offset: usize) -> Result<String, PointerError> {
    if !raw.contains('~') {
        return Ok(raw.to_owned());
    }
    let mut token = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((idx, ch)) = chars.next() {
        if ch != '~' {
            token.push(ch);
            continue;
        }
        match chars.next() {
            Some((_, '0')) => token.push('~'),
            Some((_, '1')) => token.push('/'),
            _ => {
                return Err(PointerError::InvalidEscape {
                    pointer: pointer.to_owned(),
                    position: offset + idx,
                });
            }
        }
    }
    Ok(token)
}

fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn parse_index(token: &str) -> Option<usize> {
    let canonical = token == "0"
        || (!token.is_empty()
            && !token.starts_with('0')
            && token.bytes().all(|byte| byte.is_ascii_digit()));
    if canonical {
        token.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            f.write_str("/")?;
            f.write_str(&escape_token(token))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = PointerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Vec<String>> for Pointer {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl<'a> IntoIterator for &'a Pointer {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Pointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Pointer;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON Pointer string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Pointer::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}
