//! Equality assertions and the mapping from diff operations to failures.

use crate::diff::{self, DiffOp, OpKind};
use crate::{DiffOptions, Failure, Node};

/// Checks that `actual` is semantically equal to `expected`.
///
/// Only the first difference is reported. `None` models an absent
/// structure; two absent structures are equal.
///
/// ```
/// # use jassert_core::{check_equal, DiffOptions, FailureKind, Node};
/// let expected = Node::from_json_str("{\"a\":1,\"b\":2}")?;
/// let actual = Node::from_json_str("{\"b\":2}")?;
/// let failure = check_equal(Some(&expected), Some(&actual), &DiffOptions::default()).unwrap_err();
/// assert_eq!(failure.kind(), FailureKind::Missing);
/// assert_eq!(failure.message(), "Missing: /a");
/// # Ok::<(), jassert_core::InputError>(())
/// ```
pub fn check_equal(
    expected: Option<&Node>,
    actual: Option<&Node>,
    options: &DiffOptions,
) -> Result<(), Failure> {
    let (expected, actual) = match (expected, actual) {
        (None, None) => return Ok(()),
        (Some(expected), None) => return Err(Failure::null(expected.clone())),
        (None, Some(actual)) => return Err(Failure::not_null(actual.clone())),
        (Some(expected), Some(actual)) => (expected, actual),
    };
    if std::ptr::eq(expected, actual) {
        return Ok(());
    }
    match diff::first_difference(expected, actual, options) {
        Some(op) => Err(classify_op(&op, expected, actual)),
        None => Ok(()),
    }
}

/// Checks that `actual` is not semantically equal to `unexpected`.
///
/// Exactly one absent side passes; two absent sides fail.
pub fn check_not_equal(
    unexpected: Option<&Node>,
    actual: Option<&Node>,
    options: &DiffOptions,
) -> Result<(), Failure> {
    match (unexpected, actual) {
        (None, None) => Err(Failure::unexpectedly_equal(None)),
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (Some(unexpected), Some(actual)) => {
            if diff::equals(unexpected, actual, options) {
                Err(Failure::unexpectedly_equal(Some(actual.clone())))
            } else {
                Ok(())
            }
        }
    }
}

/// Classifies a single diff operation produced by comparing `expected`
/// against `actual`.
///
/// ```
/// # use jassert_core::{classify_op, diff::DiffOp, FailureKind, Node, Pointer};
/// let expected = Node::from_json_str("{\"a\":1}")?;
/// let actual = Node::from_json_str("{\"a\":1,\"b\":2}")?;
/// let op = DiffOp::add(Pointer::root().child_key("b"), Node::from(2));
/// assert_eq!(classify_op(&op, &expected, &actual).kind(), FailureKind::Unexpected);
/// # Ok::<(), jassert_core::InputError>(())
/// ```
#[must_use]
pub fn classify_op(op: &DiffOp, expected: &Node, actual: &Node) -> Failure {
    match op.op {
        OpKind::Remove => Failure::missing(op.path.clone()),
        OpKind::Add => Failure::unexpected(op.path.clone()),
        OpKind::Replace => Failure::invalid(
            op.path.clone(),
            op.path.resolve(expected).cloned(),
            op.path.resolve(actual).cloned(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayDiff, FailureKind, Pointer};
    use proptest::prelude::*;

    fn node(text: &str) -> Node {
        Node::from_json_str(text).unwrap()
    }

    fn equal(expected: &str, actual: &str) -> Result<(), Failure> {
        check_equal(Some(&node(expected)), Some(&node(actual)), &DiffOptions::default())
    }

    #[test]
    fn same_reference_passes() {
        let doc = node("{\"a\":[1,{\"b\":null}]}");
        assert!(check_equal(Some(&doc), Some(&doc), &DiffOptions::default()).is_ok());
    }

    #[test]
    fn absent_sides_map_to_null_and_not_null() {
        let doc = node("{}");
        let opts = DiffOptions::default();
        assert!(check_equal(None, None, &opts).is_ok());
        assert_eq!(check_equal(Some(&doc), None, &opts).unwrap_err().kind(), FailureKind::Null);
        assert_eq!(check_equal(None, Some(&doc), &opts).unwrap_err().kind(), FailureKind::NotNull);
    }

    #[test]
    fn missing_array_element_is_reported_at_its_index() {
        let failure = equal("{\"x\":[{\"a\":\"p\"},{\"a\":\"q\"}]}", "{\"x\":[{\"a\":\"p\"}]}").unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Missing);
        assert_eq!(failure.path(), Some(&Pointer::parse("/x/1").unwrap()));
        assert!(failure.expected().is_none());
    }

    #[test]
    fn replacement_resolves_both_payloads() {
        let failure = equal("{\"a\":{\"b\":[1,2]}}", "{\"a\":{\"b\":[1,\"2\"]}}").unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Invalid);
        assert_eq!(failure.message(), "Invalid: /a/b/1");
        assert_eq!(failure.expected(), Some(&node("2")));
        assert_eq!(failure.actual(), Some(&node("\"2\"")));
    }

    #[test]
    fn extra_key_is_unexpected() {
        let failure = equal("{\"a\":1}", "{\"a\":1,\"b\":2}").unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Unexpected);
        assert_eq!(failure.message(), "Unexpected: /b");
    }

    #[test]
    fn lcs_alignment_reports_inserted_element() {
        let opts = DiffOptions::default().with_array_diff(ArrayDiff::Lcs);
        let expected = node("[{\"test\":\"E\"}]");
        let actual = node("[{\"test\":\"U\"},{\"test\":\"E\"}]");
        let failure = check_equal(Some(&expected), Some(&actual), &opts).unwrap_err();
        assert_eq!(failure.message(), "Unexpected: /0");
    }

    #[test]
    fn not_equal_rules_for_absence() {
        let opts = DiffOptions::default();
        let doc = node("[]");
        let failure = check_not_equal(None, None, &opts).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::UnexpectedlyEqual);
        assert!(check_not_equal(Some(&doc), None, &opts).is_ok());
        assert!(check_not_equal(None, Some(&doc), &opts).is_ok());
    }

    #[test]
    fn not_equal_fails_with_actual_payload() {
        let opts = DiffOptions::default();
        let failure =
            check_not_equal(Some(&node("{\"a\":1,\"b\":2}")), Some(&node("{\"b\":2,\"a\":1}")), &opts)
                .unwrap_err();
        assert_eq!(failure.actual(), Some(&node("{\"b\":2,\"a\":1}")));
        assert!(failure.expected().is_none());
        assert!(check_not_equal(Some(&node("[1,2]")), Some(&node("[2,1]")), &opts).is_ok());
    }

    proptest! {
        #[test]
        fn equal_and_not_equal_are_complementary(a in 0i32..4, b in 0i32..4, nested in any::<bool>()) {
            let wrap = |n: i32| if nested { node(&format!("{{\"k\":[{n}]}}")) } else { Node::from(n) };
            let (a, b) = (wrap(a), wrap(b));
            let opts = DiffOptions::default();
            let equal = check_equal(Some(&a), Some(&b), &opts).is_ok();
            let not_equal = check_not_equal(Some(&a), Some(&b), &opts).is_ok();
            prop_assert_ne!(equal, not_equal);
        }
    }
}
