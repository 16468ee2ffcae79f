use thiserror::Error;

use crate::Failure;

/// Errors raised while turning caller input into [`Node`](crate::Node) values.
///
/// These signal misuse of the API (malformed JSON text, a scalar where an
/// array or structure is required, a malformed pointer) and are never
/// reported as an assertion [`Failure`].
#[derive(Debug, Error)]
pub enum InputError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A number whose text is not a valid decimal.
    #[error("number {value} is not a valid decimal")]
    InvalidNumber {
        /// The textual representation of the offending number.
        value: String,
    },
    /// Attempted to construct a [`Number`](crate::Number) that is not finite.
    #[error("non-finite number encountered: {value}")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
    /// An argument that must be a JSON array held another kind of value.
    #[error("expected {role} to be a JSON array but found {found}")]
    NotAnArray {
        /// Which argument was wrong (e.g. `"actual"`).
        role: &'static str,
        /// The JSON type that was found instead.
        found: &'static str,
    },
    /// An argument that must be a JSON object or array held a scalar.
    #[error("expected {role} to be a JSON object or array but found {found}")]
    NotAStructure {
        /// Which argument was wrong (e.g. `"expected"`).
        role: &'static str,
        /// The JSON type that was found instead.
        found: &'static str,
    },
    /// The pointer text was malformed.
    #[error(transparent)]
    Pointer(#[from] PointerError),
}

/// Errors produced when parsing JSON Pointer (RFC 6901) text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// Non-empty pointers must begin with `/`.
    #[error("JSON Pointer must be empty or start with '/': {pointer:?}")]
    MissingLeadingSlash {
        /// The rejected pointer text.
        pointer: String,
    },
    /// `~` was not followed by `0` or `1`.
    #[error("invalid escape sequence at byte {position} in JSON Pointer {pointer:?}")]
    InvalidEscape {
        /// The rejected pointer text.
        pointer: String,
        /// Byte offset of the offending `~`.
        position: usize,
    },
}

/// Errors emitted when constructing [`DiffOptions`](crate::DiffOptions).
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    /// Precision tolerance must be a finite, non-negative number.
    #[error("precision must be a finite non-negative number, got {value}")]
    InvalidPrecision {
        /// The rejected tolerance.
        value: f64,
    },
}

/// Outcome of an assertion that did not pass.
///
/// Keeps assertion failures and input errors apart so that a malformed
/// argument is never mistaken for a failed check.
#[derive(Debug, Error)]
pub enum AssertError {
    /// The assertion ran and did not hold.
    #[error(transparent)]
    Failed(#[from] Failure),
    /// The assertion could not run because an argument was unusable.
    #[error(transparent)]
    Input(#[from] InputError),
}

impl AssertError {
    /// Returns the classified failure if the assertion ran and failed.
    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Input(_) => None,
        }
    }

    /// Indicates whether this is an assertion failure rather than an input error.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
