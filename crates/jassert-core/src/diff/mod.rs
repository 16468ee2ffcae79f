//! Structural diff data structures and algorithms.
//!
//! [`diff_nodes`] walks an expected and an actual document side by side and
//! yields an ordered sequence of [`DiffOp`]s addressed by JSON Pointer.
//! Ordering is deterministic: object keys follow expected insertion order
//! followed by actual-only keys, array indices ascend. [`equals`] and the
//! assertion classifier are built on the same traversal and stop at the
//! first difference.

mod list;
mod object;
mod primitives;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DiffOptions, Node, Pointer};

const COLOR_RED: &str = "\u{1b}[31m";
const COLOR_GREEN: &str = "\u{1b}[32m";
const COLOR_YELLOW: &str = "\u{1b}[33m";
const COLOR_RESET: &str = "\u{1b}[0m";

/// The three kinds of structural difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    /// A location exists only in the actual document.
    Add,
    /// A location exists only in the expected document.
    Remove,
    /// A location exists in both documents with different values.
    Replace,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Remove => f.write_str("remove"),
            Self::Replace => f.write_str("replace"),
        }
    }
}

/// A single structural difference.
///
/// `path` points into the actual document for [`OpKind::Add`], into the
/// expected document for [`OpKind::Remove`], and into both for
/// [`OpKind::Replace`]. `value` carries the actual value for additions and
/// replacements and the expected value for removals.
///
/// ```
/// # use jassert_core::{diff::{DiffOp, OpKind}, Node, Pointer};
/// let op = DiffOp::add(Pointer::root().child_key("b"), Node::from(2));
/// assert_eq!(op.op, OpKind::Add);
/// assert_eq!(op.path.to_string(), "/b");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiffOp {
    /// What kind of difference this is.
    pub op: OpKind,
    /// Where the difference is located.
    pub path: Pointer,
    /// The value involved in the difference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Node>,
}

impl DiffOp {
    /// Builds an addition of `value` at `path`.
    #[must_use]
    pub fn add(path: Pointer, value: Node) -> Self {
        Self { op: OpKind::Add, path, value: Some(value) }
    }

    /// Builds a removal of the expected `value` at `path`.
    #[must_use]
    pub fn remove(path: Pointer, value: Node) -> Self {
        Self { op: OpKind::Remove, path, value: Some(value) }
    }

    /// Builds a replacement by the actual `value` at `path`.
    #[must_use]
    pub fn replace(path: Pointer, value: Node) -> Self {
        Self { op: OpKind::Replace, path, value: Some(value) }
    }
}

/// Ordered collection of diff operations.
///
/// ```
/// # use jassert_core::{DiffOptions, Node};
/// let expected = Node::from_json_str("{\"a\":1,\"b\":2}")?;
/// let actual = Node::from_json_str("{\"b\":3,\"c\":4}")?;
/// let diff = expected.diff(&actual, &DiffOptions::default());
/// let paths: Vec<_> = diff.iter().map(|op| op.path.to_string()).collect();
/// assert_eq!(paths, ["/a", "/b", "/c"]);
/// # Ok::<(), jassert_core::InputError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diff {
    ops: Vec<DiffOp>,
}

impl Diff {
    /// Builds a diff from the provided operations.
    #[must_use]
    pub fn from_ops(ops: Vec<DiffOp>) -> Self {
        Self { ops }
    }

    /// Returns the number of operations in the diff.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Indicates whether the diff is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the first operation, if any.
    #[must_use]
    pub fn first(&self) -> Option<&DiffOp> {
        self.ops.first()
    }

    /// Returns an iterator over the operations.
    pub fn iter(&self) -> std::slice::Iter<'_, DiffOp> {
        self.ops.iter()
    }

    /// Consumes the diff and returns the operations.
    #[must_use]
    pub fn into_ops(self) -> Vec<DiffOp> {
        self.ops
    }

    /// Renders the diff as human-readable hunks.
    ///
    /// Each hunk starts with `@ <pointer>` followed by `- value` for a
    /// removal, `+ value` for an addition, or `~ value` for a replacement.
    ///
    /// ```
    /// # use jassert_core::{DiffOptions, Node, RenderConfig};
    /// let lhs = Node::from_json_str("{\"a\":1}")?;
    /// let rhs = Node::from_json_str("{\"a\":2}")?;
    /// let diff = lhs.diff(&rhs, &DiffOptions::default());
    /// assert_eq!(diff.render(&RenderConfig::default()), "@ /a\n~ 2\n");
    /// # Ok::<(), jassert_core::InputError>(())
    /// ```
    #[must_use]
    pub fn render(&self, config: &RenderConfig) -> String {
        let mut output = String::new();
        for op in &self.ops {
            output.push_str("@ ");
            output.push_str(&op.path.to_string());
            output.push('\n');
            let (marker, color) = match op.op {
                OpKind::Remove => ('-', COLOR_RED),
                OpKind::Add => ('+', COLOR_GREEN),
                OpKind::Replace => ('~', COLOR_YELLOW),
            };
            let value = op.value.as_ref().map_or_else(|| "null".to_string(), Node::to_string);
            if config.color_enabled() {
                output.push_str(color);
            }
            output.push(marker);
            output.push(' ');
            output.push_str(&value);
            if config.color_enabled() {
                output.push_str(COLOR_RESET);
            }
            output.push('\n');
        }
        output
    }

    /// Serializes the diff as a JSON array of `{"op","path","value"}` objects.
    pub fn render_raw(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.ops)
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a DiffOp;
    type IntoIter = std::slice::Iter<'a, DiffOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl IntoIterator for Diff {
    type Item = DiffOp;
    type IntoIter = std::vec::IntoIter<DiffOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// Configuration toggles for human-readable rendering.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderConfig {
    color: bool,
}

impl RenderConfig {
    /// Constructs a configuration with default settings (no ANSI color).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables ANSI color output.
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Indicates whether color output is enabled.
    #[must_use]
    pub fn color_enabled(self) -> bool {
        self.color
    }

    pub(crate) fn paint(self, text: &str, color: &str) -> String {
        if self.color {
            format!("{color}{text}{COLOR_RESET}")
        } else {
            text.to_string()
        }
    }

    pub(crate) fn red(self, text: &str) -> String {
        self.paint(text, COLOR_RED)
    }

    pub(crate) fn green(self, text: &str) -> String {
        self.paint(text, COLOR_GREEN)
    }
}

/// Accumulates operations during a traversal, optionally stopping after a
/// fixed number of them.
pub(crate) struct Collector {
    ops: Vec<DiffOp>,
    limit: Option<usize>,
}

impl Collector {
    fn unbounded() -> Self {
        Self { ops: Vec::new(), limit: None }
    }

    fn first_only() -> Self {
        Self { ops: Vec::with_capacity(1), limit: Some(1) }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.ops.len() >= limit)
    }

    pub(crate) fn push(&mut self, op: DiffOp) {
        if !self.is_full() {
            self.ops.push(op);
        }
    }
}

/// Computes every structural difference between `expected` and `actual`.
#[must_use]
pub fn diff_nodes(expected: &Node, actual: &Node, options: &DiffOptions) -> Diff {
    let mut collector = Collector::unbounded();
    diff_impl(expected, actual, &Pointer::root(), options, &mut collector);
    tracing::trace!(ops = collector.ops.len(), "computed structural diff");
    Diff::from_ops(collector.ops)
}

/// Computes only the first difference, stopping the traversal as soon as it
/// is found.
///
/// Always equal to `diff_nodes(expected, actual, options).first()`.
///
/// ```
/// # use jassert_core::{diff::{first_difference, OpKind}, DiffOptions, Node};
/// let expected = Node::from_json_str("{\"a\":1,\"b\":2}")?;
/// let actual = Node::from_json_str("{\"b\":3}")?;
/// let op = first_difference(&expected, &actual, &DiffOptions::default()).unwrap();
/// assert_eq!(op.op, OpKind::Remove);
/// assert_eq!(op.path.to_string(), "/a");
/// # Ok::<(), jassert_core::InputError>(())
/// ```
#[must_use]
pub fn first_difference(expected: &Node, actual: &Node, options: &DiffOptions) -> Option<DiffOp> {
    let mut collector = Collector::first_only();
    diff_impl(expected, actual, &Pointer::root(), options, &mut collector);
    collector.ops.pop()
}

/// Semantic equality: object key order is ignored, array order and value
/// types are not.
///
/// ```
/// # use jassert_core::{diff::equals, DiffOptions, Node};
/// let opts = DiffOptions::default();
/// let a = Node::from_json_str("[1,2]")?;
/// let b = Node::from_json_str("[2,1]")?;
/// assert!(!equals(&a, &b, &opts));
/// assert!(equals(&a, &a, &opts));
/// # Ok::<(), jassert_core::InputError>(())
/// ```
#[must_use]
pub fn equals(lhs: &Node, rhs: &Node, options: &DiffOptions) -> bool {
    if std::ptr::eq(lhs, rhs) {
        return true;
    }
    match (lhs, rhs) {
        (Node::Object(_), Node::Object(_)) | (Node::Array(_), Node::Array(_)) => {
            first_difference(lhs, rhs, options).is_none()
        }
        _ => primitives::scalar_equals(lhs, rhs, options),
    }
}

pub(crate) fn diff_impl(
    expected: &Node,
    actual: &Node,
    path: &Pointer,
    options: &DiffOptions,
    out: &mut Collector,
) {
    if out.is_full() || std::ptr::eq(expected, actual) {
        return;
    }
    match (expected, actual) {
        (Node::Object(left), Node::Object(right)) => {
            object::diff_objects(left, right, path, options, out);
        }
        (Node::Array(left), Node::Array(right)) => list::diff_lists(left, right, path, options, out),
        _ => primitives::diff_primitives(expected, actual, path, options, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArrayDiff;
    use proptest::prelude::*;

    fn node(text: &str) -> Node {
        Node::from_json_str(text).unwrap()
    }

    fn pointer(text: &str) -> Pointer {
        Pointer::parse(text).unwrap()
    }

    #[test]
    fn diff_of_numbers_produces_replacement() {
        let diff = diff_nodes(&node("1"), &node("2"), &DiffOptions::default());
        assert_eq!(diff, Diff::from_ops(vec![DiffOp::replace(Pointer::root(), node("2"))]));
    }

    #[test]
    fn diff_of_mismatched_types_replaces_whole_value() {
        let diff = diff_nodes(&node("{\"a\":[1]}"), &node("{\"a\":{\"0\":1}}"), &DiffOptions::default());
        assert_eq!(diff, Diff::from_ops(vec![DiffOp::replace(pointer("/a"), node("{\"0\":1}"))]));
    }

    #[test]
    fn diff_of_objects_tracks_additions_and_removals() {
        let diff = diff_nodes(
            &node("{\"a\":1,\"b\":2}"),
            &node("{\"b\":2,\"c\":3}"),
            &DiffOptions::default(),
        );
        let expected = Diff::from_ops(vec![
            DiffOp::remove(pointer("/a"), node("1")),
            DiffOp::add(pointer("/c"), node("3")),
        ]);
        assert_eq!(diff, expected);
    }

    #[test]
    fn object_key_order_follows_expected_then_actual() {
        let diff = diff_nodes(
            &node("{\"z\":1,\"m\":1,\"a\":1}"),
            &node("{\"q\":0,\"a\":2,\"z\":2}"),
            &DiffOptions::default(),
        );
        let paths: Vec<_> = diff.iter().map(|op| op.path.to_string()).collect();
        assert_eq!(paths, ["/z", "/m", "/a", "/q"]);
    }

    #[test]
    fn null_is_a_concrete_value() {
        let diff = diff_nodes(&node("{\"a\":null}"), &node("{}"), &DiffOptions::default());
        assert_eq!(diff, Diff::from_ops(vec![DiffOp::remove(pointer("/a"), Node::Null)]));
    }

    #[test]
    fn first_difference_matches_full_diff_head() {
        let expected = node("{\"x\":[{\"a\":\"p\"},{\"a\":\"q\"}],\"y\":1}");
        let actual = node("{\"x\":[{\"a\":\"p\"}],\"y\":2}");
        let opts = DiffOptions::default();
        let full = diff_nodes(&expected, &actual, &opts);
        assert_eq!(full.len(), 2);
        assert_eq!(first_difference(&expected, &actual, &opts).as_ref(), full.first());
        assert_eq!(full.first().unwrap().path, pointer("/x/1"));
    }

    #[test]
    fn equals_respects_precision() {
        let opts = DiffOptions::default().with_precision(0.1).unwrap();
        assert!(equals(&node("[1.0]"), &node("[1.05]"), &opts));
        assert!(!equals(&node("[1.0]"), &node("[1.05]"), &DiffOptions::default()));
    }

    #[test]
    fn equals_distinguishes_types() {
        let opts = DiffOptions::default();
        assert!(!equals(&node("1"), &node("\"1\""), &opts));
        assert!(!equals(&node("null"), &node("false"), &opts));
        assert!(!equals(&node("[]"), &node("{}"), &opts));
        assert!(equals(&node("null"), &node("null"), &opts));
    }

    #[test]
    fn render_marks_each_kind() {
        let diff = diff_nodes(
            &node("{\"a\":1,\"b\":2}"),
            &node("{\"b\":3,\"c\":4}"),
            &DiffOptions::default(),
        );
        let rendered = diff.render(&RenderConfig::default());
        assert_eq!(rendered, "@ /a\n- 1\n@ /b\n~ 3\n@ /c\n+ 4\n");
    }

    #[test]
    fn render_with_color_wraps_markers() {
        let diff = diff_nodes(&node("[1]"), &node("[]"), &DiffOptions::default());
        let rendered = diff.render(&RenderConfig::default().with_color(true));
        assert!(rendered.contains("\u{1b}[31m- 1\u{1b}[0m"));
    }

    #[test]
    fn render_raw_uses_patch_shape() {
        let diff = diff_nodes(&node("{\"a\":1}"), &node("{\"a\":2}"), &DiffOptions::default());
        assert_eq!(diff.render_raw().unwrap(), "[{\"op\":\"replace\",\"path\":\"/a\",\"value\":2}]");
    }

    fn arb_json_value() -> impl Strategy<Value = serde_json::Value> {
        use proptest::{collection::btree_map, collection::vec, string::string_regex};

        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::Bool),
            (-5i64..5).prop_map(|n| serde_json::Value::Number(n.into())),
            string_regex("[a-c]{0,2}").unwrap().prop_map(serde_json::Value::String),
        ];
        leaf.prop_recursive(3, 8, 4, move |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
                btree_map(string_regex("[a-d]{1,2}").unwrap(), inner, 0..4).prop_map(|map| {
                    let mut object = serde_json::Map::new();
                    for (k, v) in map {
                        object.insert(k, v);
                    }
                    serde_json::Value::Object(object)
                }),
            ]
        })
    }

    fn strategies() -> [DiffOptions; 2] {
        [DiffOptions::default(), DiffOptions::default().with_array_diff(ArrayDiff::Lcs)]
    }

    proptest! {
        #[test]
        fn identical_nodes_produce_empty_diff(json in arb_json_value()) {
            let node = Node::from_json_value(json.clone()).unwrap();
            let other = Node::from_json_value(json).unwrap();
            for opts in strategies() {
                prop_assert!(diff_nodes(&node, &other, &opts).is_empty());
            }
        }

        #[test]
        fn empty_diff_iff_structurally_equal(a in arb_json_value(), b in arb_json_value()) {
            let a = Node::from_json_value(a).unwrap();
            let b = Node::from_json_value(b).unwrap();
            for opts in strategies() {
                prop_assert_eq!(diff_nodes(&a, &b, &opts).is_empty(), a == b);
                prop_assert_eq!(equals(&a, &b, &opts), a == b);
            }
        }

        #[test]
        fn first_difference_is_head_of_diff(a in arb_json_value(), b in arb_json_value()) {
            let a = Node::from_json_value(a).unwrap();
            let b = Node::from_json_value(b).unwrap();
            for opts in strategies() {
                let full = diff_nodes(&a, &b, &opts);
                let head = first_difference(&a, &b, &opts);
                prop_assert_eq!(head.as_ref(), full.first());
            }
        }

        #[test]
        fn op_paths_resolve_in_their_documents(a in arb_json_value(), b in arb_json_value()) {
            let a = Node::from_json_value(a).unwrap();
            let b = Node::from_json_value(b).unwrap();
            for opts in strategies() {
                for op in &diff_nodes(&a, &b, &opts) {
                    let in_expected = op.path.resolve(&a);
                    let in_actual = op.path.resolve(&b);
                    match op.op {
                        OpKind::Remove => prop_assert_eq!(in_expected, op.value.as_ref()),
                        OpKind::Add => prop_assert_eq!(in_actual, op.value.as_ref()),
                        OpKind::Replace => {
                            prop_assert!(in_expected.is_some());
                            prop_assert_eq!(in_actual, op.value.as_ref());
                        }
                    }
                }
            }
        }
    }
}
