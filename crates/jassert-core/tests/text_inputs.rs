use jassert_core::{
    assert_contains, assert_contains_all, assert_contains_property, assert_equal,
    assert_not_contains_property, assert_not_equal, AssertError, FailureKind, InputError, Node,
};
use serde_json::json;

const EXPECTED: &str = r#"{"x":[{"a":"p"},{"a":"q"}]}"#;
const ACTUAL: &str = r#"{"x":[{"a":"p"}]}"#;

fn kind(result: Result<(), AssertError>) -> FailureKind {
    result.expect_err("assertion should fail").failure().expect("a failure, not an input error").kind()
}

#[test]
fn every_argument_shape_reports_the_same_failure() {
    let expected = Node::from_json_str(EXPECTED).expect("parses");
    let actual = Node::from_json_str(ACTUAL).expect("parses");

    assert_eq!(kind(assert_equal(&expected, &actual)), FailureKind::Missing);
    assert_eq!(kind(assert_equal(EXPECTED, ACTUAL)), FailureKind::Missing);
    assert_eq!(kind(assert_equal(EXPECTED, &actual)), FailureKind::Missing);
    assert_eq!(kind(assert_equal(&expected, ACTUAL)), FailureKind::Missing);
    assert_eq!(kind(assert_equal(EXPECTED.to_owned(), actual.clone())), FailureKind::Missing);

    let err = assert_equal(EXPECTED, ACTUAL).unwrap_err();
    assert_eq!(err.to_string(), "Missing: /x/1");
}

#[test]
fn serde_json_values_are_accepted() {
    let value = json!({"b": 2, "a": [1, null]});
    assert_equal(&value, r#"{"a":[1,null],"b":2}"#).expect("equal");
    assert_not_equal(value.clone(), json!({"a": [null, 1], "b": 2})).expect("array order matters");
    assert_contains(json!({"k": true}), json!([{"k": true}])).expect("contained");
}

#[test]
fn malformed_text_surfaces_as_input_error() {
    let err = assert_equal("{\"a\":", "{}").unwrap_err();
    assert!(matches!(err, AssertError::Input(InputError::Json(_))));
    let err = assert_contains("1", "[1,").unwrap_err();
    assert!(!err.is_failure());
}

#[test]
fn array_arguments_must_be_arrays() {
    let err = assert_contains_all("[1]", "{}").unwrap_err();
    match err {
        AssertError::Input(InputError::NotAnArray { role, found }) => {
            assert_eq!(role, "actual");
            assert_eq!(found, "object");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn pointer_text_is_validated() {
    let err = assert_contains_property("1", "a/b", "{}").unwrap_err();
    assert!(matches!(err, AssertError::Input(InputError::Pointer(_))));
    let err = assert_not_contains_property("1", "/a~2", "{}").unwrap_err();
    assert!(matches!(err, AssertError::Input(InputError::Pointer(_))));
    assert_contains_property("1", "/a~1b", r#"{"a/b":1}"#).expect("escaped key resolves");
}
