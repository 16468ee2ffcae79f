use crate::diff::equals;
use crate::{DiffOptions, Failure, Node, Pointer};

/// Checks that `path` resolves in `actual` to a value equal to `expected`.
///
/// An absent `expected` is compared as `null`.
///
/// ```
/// # use jassert_core::{check_contains_property, DiffOptions, FailureKind, Node, Pointer};
/// let actual = Node::from_json_str("{\"a\":{\"b\":1}}")?;
/// let path = Pointer::parse("/a/b")?;
/// let expected = Node::from(2);
/// let failure = check_contains_property(Some(&expected), &path, Some(&actual), &DiffOptions::default())
///     .unwrap_err();
/// assert_eq!(failure.kind(), FailureKind::Invalid);
/// assert_eq!(failure.actual(), Some(&Node::from(1)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn check_contains_property(
    expected: Option<&Node>,
    path: &Pointer,
    actual: Option<&Node>,
    options: &DiffOptions,
) -> Result<(), Failure> {
    let Some(found) = actual.and_then(|document| path.resolve(document)) else {
        return Err(Failure::missing(path.clone()));
    };
    let expected = expected.unwrap_or(&Node::Null);
    if equals(expected, found, options) {
        Ok(())
    } else {
        Err(Failure::invalid(path.clone(), Some(expected.clone()), Some(found.clone())))
    }
}

/// Checks that `path` does not resolve in `actual` to a value equal to
/// `unexpected`. An unresolvable path passes.
pub fn check_not_contains_property(
    unexpected: Option<&Node>,
    path: &Pointer,
    actual: Option<&Node>,
    options: &DiffOptions,
) -> Result<(), Failure> {
    let Some(found) = actual.and_then(|document| path.resolve(document)) else {
        return Ok(());
    };
    if equals(unexpected.unwrap_or(&Node::Null), found, options) {
        Err(Failure::unexpected_property(found, path.clone()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;

    fn node(text: &str) -> Node {
        Node::from_json_str(text).unwrap()
    }

    fn pointer(text: &str) -> Pointer {
        Pointer::parse(text).unwrap()
    }

    #[test]
    fn unresolvable_path_is_missing() {
        let opts = DiffOptions::default();
        let doc = node("{\"a\":{\"b\":1}}");
        let failure =
            check_contains_property(Some(&node("1")), &pointer("/a/c"), Some(&doc), &opts).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Missing);
        assert_eq!(failure.message(), "Missing: /a/c");
        let failure = check_contains_property(Some(&node("1")), &pointer("/a"), None, &opts).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Missing);
    }

    #[test]
    fn absent_expected_matches_explicit_null() {
        let opts = DiffOptions::default();
        let doc = node("{\"a\":null}");
        assert!(check_contains_property(None, &pointer("/a"), Some(&doc), &opts).is_ok());
        let failure =
            check_contains_property(None, &pointer("/a"), Some(&node("{\"a\":0}")), &opts).unwrap_err();
        assert_eq!(failure.expected(), Some(&Node::Null));
    }

    #[test]
    fn structured_property_values_compare_semantically() {
        let opts = DiffOptions::default();
        let doc = node("{\"items\":[{\"id\":1,\"tags\":[\"x\"]}]}");
        let expected = node("{\"tags\":[\"x\"],\"id\":1}");
        assert!(check_contains_property(Some(&expected), &pointer("/items/0"), Some(&doc), &opts).is_ok());
    }

    #[test]
    fn root_pointer_addresses_whole_document() {
        let opts = DiffOptions::default();
        let doc = node("[1]");
        assert!(check_contains_property(Some(&doc), &Pointer::root(), Some(&doc), &opts).is_ok());
    }

    #[test]
    fn not_contains_property_fails_on_equal_value() {
        let opts = DiffOptions::default();
        let doc = node("{\"a\":{\"b\":1}}");
        let failure =
            check_not_contains_property(Some(&node("1")), &pointer("/a/b"), Some(&doc), &opts).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::UnexpectedProperty);
        assert_eq!(failure.message(), "Unexpected value: 1 at: /a/b");
        assert!(check_not_contains_property(Some(&node("2")), &pointer("/a/b"), Some(&doc), &opts).is_ok());
        assert!(check_not_contains_property(Some(&node("1")), &pointer("/z"), Some(&doc), &opts).is_ok());
        assert!(check_not_contains_property(Some(&node("1")), &pointer("/a"), None, &opts).is_ok());
    }
}
