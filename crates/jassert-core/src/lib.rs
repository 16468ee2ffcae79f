//! Semantic JSON equality, structural diff, and assertion predicates for
//! test suites.
//!
//! `jassert-core` compares JSON documents ignoring object key order,
//! reports the first difference as a classified, pointer-addressed
//! [`Failure`], and answers containment and property questions under the
//! same equality. Arguments may be parsed [`Node`]s, JSON text, or
//! `serde_json` values.
//!
//! ```
//! use jassert_core::{assert_equal, DiffOptions, FailureKind, Node, RenderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let expected = Node::from_json_str("{\"x\":[{\"a\":\"p\"},{\"a\":\"q\"}]}")?;
//!     let actual = "{\"x\":[{\"a\":\"p\"}]}";
//!
//!     let err = assert_equal(&expected, actual).unwrap_err();
//!     let failure = err.failure().ok_or("expected an assertion failure")?;
//!     assert_eq!(failure.kind(), FailureKind::Missing);
//!     assert_eq!(failure.message(), "Missing: /x/1");
//!
//!     let diff = expected.diff(&Node::from_json_str(actual)?, &DiffOptions::default());
//!     assert_eq!(diff.render(&RenderConfig::default()), "@ /x/1\n- {\"a\":\"q\"}\n");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assert;
mod classify;
mod contains;
pub mod diff;
mod error;
mod failure;
mod input;
mod node;
mod number;
mod options;
mod pointer;
mod property;

pub use assert::{
    assert_contains, assert_contains_all, assert_contains_any, assert_contains_none,
    assert_contains_property, assert_equal, assert_not_contains, assert_not_contains_property,
    assert_not_equal, JsonAssert,
};
pub use classify::{check_equal, check_not_equal, classify_op};
pub use contains::{
    check_contains, check_contains_all, check_contains_any, check_contains_none,
    check_not_contains, contains,
};
pub use diff::{Diff, DiffOp, OpKind, RenderConfig};
pub use error::{AssertError, InputError, OptionsError, PointerError};
pub use failure::{Failure, FailureKind};
pub use input::JsonInput;
pub use node::{Node, Object};
pub use number::Number;
pub use options::{ArrayDiff, DiffOptions};
pub use pointer::Pointer;
pub use property::{check_contains_property, check_not_contains_property};

/// Returns the semantic version of the `jassert-core` crate.
///
/// ```
/// assert!(!jassert_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
