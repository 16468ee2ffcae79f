//! Element containment and set-membership assertions.
//!
//! Containment is existential: an element is contained when some array
//! entry is semantically equal to it. An absent element is looked up as
//! `null`.

use crate::diff::equals;
use crate::{DiffOptions, Failure, Node};

/// Returns whether `array` holds an entry semantically equal to `element`.
///
/// An absent or empty array contains nothing.
///
/// ```
/// # use jassert_core::{contains, DiffOptions, Node};
/// let array = Node::from_json_str("[{\"a\":1,\"b\":2}, null]")?;
/// let element = Node::from_json_str("{\"b\":2,\"a\":1}")?;
/// let opts = DiffOptions::default();
/// assert!(contains(Some(&element), array.as_array(), &opts));
/// assert!(contains(None, array.as_array(), &opts));
/// assert!(!contains(None, Some(&[][..]), &opts));
/// # Ok::<(), jassert_core::InputError>(())
/// ```
#[must_use]
pub fn contains(element: Option<&Node>, array: Option<&[Node]>, options: &DiffOptions) -> bool {
    let element = element.unwrap_or(&Node::Null);
    array.is_some_and(|items| items.iter().any(|entry| equals(element, entry, options)))
}

/// Fails with [`FailureKind::NotContaining`](crate::FailureKind::NotContaining)
/// unless `array` contains `element`.
pub fn check_contains(
    element: Option<&Node>,
    array: Option<&[Node]>,
    options: &DiffOptions,
) -> Result<(), Failure> {
    if contains(element, array, options) {
        Ok(())
    } else {
        Err(Failure::not_containing(element.unwrap_or(&Node::Null), array))
    }
}

/// Fails with [`FailureKind::Containing`](crate::FailureKind::Containing)
/// when `array` contains `element`.
pub fn check_not_contains(
    element: Option<&Node>,
    array: Option<&[Node]>,
    options: &DiffOptions,
) -> Result<(), Failure> {
    if contains(element, array, options) {
        Err(Failure::containing(element.unwrap_or(&Node::Null), array))
    } else {
        Ok(())
    }
}

/// Checks every entry of `expecteds` independently; duplicates need only
/// one matching occurrence. Absent or empty `expecteds` pass.
pub fn check_contains_all(
    expecteds: Option<&[Node]>,
    actual: Option<&[Node]>,
    options: &DiffOptions,
) -> Result<(), Failure> {
    let Some(expecteds) = expecteds else {
        return Ok(());
    };
    let missing: Vec<Node> = expecteds
        .iter()
        .filter(|element| !contains(Some(element), actual, options))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Failure::not_containing_all(&missing, actual))
    }
}

/// Passes when `actual` contains at least one entry of `expecteds`, or when
/// `expecteds` is absent or empty.
pub fn check_contains_any(
    expecteds: Option<&[Node]>,
    actual: Option<&[Node]>,
    options: &DiffOptions,
) -> Result<(), Failure> {
    let Some(expecteds) = expecteds.filter(|items| !items.is_empty()) else {
        return Ok(());
    };
    let found = actual.is_some_and(|items| !items.is_empty())
        && expecteds.iter().any(|element| contains(Some(element), actual, options));
    if found {
        Ok(())
    } else {
        Err(Failure::not_containing_any(expecteds, actual))
    }
}

/// Fails with every entry of `unexpecteds` that `actual` contains.
pub fn check_contains_none(
    unexpecteds: Option<&[Node]>,
    actual: Option<&[Node]>,
    options: &DiffOptions,
) -> Result<(), Failure> {
    let Some(unexpecteds) = unexpecteds else {
        return Ok(());
    };
    let found: Vec<Node> = unexpecteds
        .iter()
        .filter(|element| contains(Some(element), actual, options))
        .cloned()
        .collect();
    if found.is_empty() {
        Ok(())
    } else {
        Err(Failure::containing_some(&found, actual))
    }
}
