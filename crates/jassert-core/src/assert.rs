//! Assertion entry points taking any [`JsonInput`].

use std::borrow::Cow;

use crate::input::{into_array, into_structure};
use crate::{
    check_contains, check_contains_all, check_contains_any, check_contains_none,
    check_contains_property, check_equal, check_not_contains, check_not_contains_property,
    check_not_equal, AssertError, DiffOptions, Failure, JsonInput, Node, Pointer,
};

/// Runs assertions with a fixed set of [`DiffOptions`].
///
/// Each method converts its arguments, runs the check, and returns either
/// `Ok(())`, [`AssertError::Failed`] with exactly one [`Failure`], or
/// [`AssertError::Input`] when an argument could not be used.
///
/// ```
/// # use jassert_core::{ArrayDiff, DiffOptions, JsonAssert};
/// let asserter = JsonAssert::new(DiffOptions::default().with_array_diff(ArrayDiff::Lcs));
/// let err = asserter
///     .equal("[{\"test\":\"E\"}]", "[{\"test\":\"U\"},{\"test\":\"E\"}]")
///     .unwrap_err();
/// assert_eq!(err.failure().unwrap().message(), "Unexpected: /0");
/// ```
#[derive(Clone, Debug, Default)]
pub struct JsonAssert {
    options: DiffOptions,
}

impl JsonAssert {
    /// Creates an asserter using `options`.
    #[must_use]
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Returns the options in use.
    #[must_use]
    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Replaces the options in use.
    #[must_use]
    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    /// Asserts that `actual` is semantically equal to `expected`.
    ///
    /// Both roots must be objects or arrays; a scalar root is an
    /// [`AssertError::Input`].
    pub fn equal<'e, 'a>(
        &self,
        expected: impl JsonInput<'e>,
        actual: impl JsonInput<'a>,
    ) -> Result<(), AssertError> {
        let (expected, actual) = structures(expected, "expected", actual)?;
        report("equal", check_equal(expected.as_deref(), actual.as_deref(), &self.options))
    }

    /// Asserts that `actual` is not semantically equal to `unexpected`.
    pub fn not_equal<'e, 'a>(
        &self,
        unexpected: impl JsonInput<'e>,
        actual: impl JsonInput<'a>,
    ) -> Result<(), AssertError> {
        let (unexpected, actual) = structures(unexpected, "unexpected", actual)?;
        report("not_equal", check_not_equal(unexpected.as_deref(), actual.as_deref(), &self.options))
    }

    /// Asserts that the `array` contains `element`.
    pub fn contains<'e, 'a>(
        &self,
        element: impl JsonInput<'e>,
        array: impl JsonInput<'a>,
    ) -> Result<(), AssertError> {
        let element = element.into_node()?;
        let array = into_array(array.into_node()?, "array")?;
        report("contains", check_contains(element.as_deref(), array.as_deref(), &self.options))
    }

    /// Asserts that the `array` does not contain `element`.
    pub fn not_contains<'e, 'a>(
        &self,
        element: impl JsonInput<'e>,
        array: impl JsonInput<'a>,
    ) -> Result<(), AssertError> {
        let element = element.into_node()?;
        let array = into_array(array.into_node()?, "array")?;
        report("not_contains", check_not_contains(element.as_deref(), array.as_deref(), &self.options))
    }

    /// Asserts that `actual` contains every entry of `expecteds`.
    pub fn contains_all<'e, 'a>(
        &self,
        expecteds: impl JsonInput<'e>,
        actual: impl JsonInput<'a>,
    ) -> Result<(), AssertError> {
        let (expecteds, actual) = arrays(expecteds, "expecteds", actual)?;
        report("contains_all", check_contains_all(expecteds.as_deref(), actual.as_deref(), &self.options))
    }

    /// Asserts that `actual` contains at least one entry of `expecteds`.
    pub fn contains_any<'e, 'a>(
        &self,
        expecteds: impl JsonInput<'e>,
        actual: impl JsonInput<'a>,
    ) -> Result<(), AssertError> {
        let (expecteds, actual) = arrays(expecteds, "expecteds", actual)?;
        report("contains_any", check_contains_any(expecteds.as_deref(), actual.as_deref(), &self.options))
    }

    /// Asserts that `actual` contains no entry of `unexpecteds`.
    pub fn contains_none<'e, 'a>(
        &self,
        unexpecteds: impl JsonInput<'e>,
        actual: impl JsonInput<'a>,
    ) -> Result<(), AssertError> {
        let (unexpecteds, actual) = arrays(unexpecteds, "unexpecteds", actual)?;
        report(
            "contains_none",
            check_contains_none(unexpecteds.as_deref(), actual.as_deref(), &self.options),
        )
    }

    /// Asserts that `path` resolves in `actual` to a value equal to `expected`.
    ///
    /// A malformed `path` or a scalar `actual` root is an
    /// [`AssertError::Input`].
    pub fn contains_property<'e, 'a>(
        &self,
        expected: impl JsonInput<'e>,
        path: &str,
        actual: impl JsonInput<'a>,
    ) -> Result<(), AssertError> {
        let (expected, path, actual) = property_args(expected, path, actual)?;
        report(
            "contains_property",
            check_contains_property(expected.as_deref(), &path, actual.as_deref(), &self.options),
        )
    }

    /// Asserts that `path` does not resolve in `actual` to a value equal to
    /// `unexpected`.
    pub fn not_contains_property<'e, 'a>(
        &self,
        unexpected: impl JsonInput<'e>,
        path: &str,
        actual: impl JsonInput<'a>,
    ) -> Result<(), AssertError> {
        let (unexpected, path, actual) = property_args(unexpected, path, actual)?;
        report(
            "not_contains_property",
            check_not_contains_property(unexpected.as_deref(), &path, actual.as_deref(), &self.options),
        )
    }
}

type Structures<'e, 'a> = (Option<Cow<'e, Node>>, Option<Cow<'a, Node>>);

fn structures<'e, 'a>(
    expected: impl JsonInput<'e>,
    role: &'static str,
    actual: impl JsonInput<'a>,
) -> Result<Structures<'e, 'a>, AssertError> {
    let expected = into_structure(expected.into_node()?, role)?;
    let actual = into_structure(actual.into_node()?, "actual")?;
    Ok((expected, actual))
}

type Arrays<'e, 'a> = (Option<Cow<'e, [Node]>>, Option<Cow<'a, [Node]>>);

fn arrays<'e, 'a>(
    elements: impl JsonInput<'e>,
    role: &'static str,
    actual: impl JsonInput<'a>,
) -> Result<Arrays<'e, 'a>, AssertError> {
    let elements = into_array(elements.into_node()?, role)?;
    let actual = into_array(actual.into_node()?, "actual")?;
    Ok((elements, actual))
}

type PropertyArgs<'e, 'a> = (Option<Cow<'e, Node>>, Pointer, Option<Cow<'a, Node>>);

fn property_args<'e, 'a>(
    value: impl JsonInput<'e>,
    path: &str,
    actual: impl JsonInput<'a>,
) -> Result<PropertyArgs<'e, 'a>, AssertError> {
    let path = Pointer::parse(path).map_err(crate::InputError::from)?;
    let actual = into_structure(actual.into_node()?, "actual")?;
    Ok((value.into_node()?, path, actual))
}

fn report(operation: &'static str, result: Result<(), Failure>) -> Result<(), AssertError> {
    result.map_err(|failure| {
        tracing::debug!(
            operation,
            kind = %failure.kind(),
            path = ?failure.path().map(ToString::to_string),
            "assertion failed"
        );
        AssertError::Failed(failure)
    })
}

/// Asserts semantic equality with default options.
///
/// ```
/// # use jassert_core::assert_equal;
/// assert!(assert_equal("{\"a\":1,\"b\":2}", "{\"b\":2,\"a\":1}").is_ok());
/// ```
pub fn assert_equal<'e, 'a>(
    expected: impl JsonInput<'e>,
    actual: impl JsonInput<'a>,
) -> Result<(), AssertError> {
    JsonAssert::default().equal(expected, actual)
}

/// Asserts semantic inequality with default options.
pub fn assert_not_equal<'e, 'a>(
    unexpected: impl JsonInput<'e>,
    actual: impl JsonInput<'a>,
) -> Result<(), AssertError> {
    JsonAssert::default().not_equal(unexpected, actual)
}

/// Asserts element containment with default options.
///
/// ```
/// # use jassert_core::{assert_contains, FailureKind};
/// assert!(assert_contains("null", "[null]").is_ok());
/// let err = assert_contains("null", "[]").unwrap_err();
/// assert_eq!(err.failure().unwrap().kind(), FailureKind::NotContaining);
/// ```
pub fn assert_contains<'e, 'a>(
    element: impl JsonInput<'e>,
    array: impl JsonInput<'a>,
) -> Result<(), AssertError> {
    JsonAssert::default().contains(element, array)
}

/// Asserts element absence with default options.
pub fn assert_not_contains<'e, 'a>(
    element: impl JsonInput<'e>,
    array: impl JsonInput<'a>,
) -> Result<(), AssertError> {
    JsonAssert::default().not_contains(element, array)
}

/// Asserts that every expected element is contained, with default options.
pub fn assert_contains_all<'e, 'a>(
    expecteds: impl JsonInput<'e>,
    actual: impl JsonInput<'a>,
) -> Result<(), AssertError> {
    JsonAssert::default().contains_all(expecteds, actual)
}

/// Asserts that some expected element is contained, with default options.
pub fn assert_contains_any<'e, 'a>(
    expecteds: impl JsonInput<'e>,
    actual: impl JsonInput<'a>,
) -> Result<(), AssertError> {
    JsonAssert::default().contains_any(expecteds, actual)
}

/// Asserts that no unexpected element is contained, with default options.
pub fn assert_contains_none<'e, 'a>(
    unexpecteds: impl JsonInput<'e>,
    actual: impl JsonInput<'a>,
) -> Result<(), AssertError> {
    JsonAssert::default().contains_none(unexpecteds, actual)
}

/// Asserts a property value at a pointer path, with default options.
///
/// ```
/// # use jassert_core::{assert_contains_property, FailureKind};
/// let err = assert_contains_property("2", "/a/b", "{\"a\":{\"b\":1}}").unwrap_err();
/// let failure = err.failure().unwrap();
/// assert_eq!(failure.kind(), FailureKind::Invalid);
/// assert_eq!(failure.message(), "Invalid: /a/b");
/// assert!(assert_contains_property("1", "a/b", "{}").unwrap_err().failure().is_none());
/// ```
pub fn assert_contains_property<'e, 'a>(
    expected: impl JsonInput<'e>,
    path: &str,
    actual: impl JsonInput<'a>,
) -> Result<(), AssertError> {
    JsonAssert::default().contains_property(expected, path, actual)
}

/// Asserts the absence of a property value at a pointer path, with default
/// options.
pub fn assert_not_contains_property<'e, 'a>(
    unexpected: impl JsonInput<'e>,
    path: &str,
    actual: impl JsonInput<'a>,
) -> Result<(), AssertError> {
    JsonAssert::default().not_contains_property(unexpected, path, actual)
}
