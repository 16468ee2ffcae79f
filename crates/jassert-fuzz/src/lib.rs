//! Fuzzing harnesses for `jassert-core`.
//!
//! Each public function accepts raw bytes, derives JSON documents from them,
//! and checks the invariants the assertion engine promises. Recoverable
//! input errors are ignored; a broken invariant panics so the fuzzer records
//! the input.
//!
//! ```
//! jassert_fuzz::fuzz_parse(b"{\"a\":[1,null]}");
//! jassert_fuzz::fuzz_diff(&[7, 1, 4, 2, 9, 3]);
//! jassert_fuzz::fuzz_assertions(b"assertions");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use jassert_core::diff::{first_difference, OpKind};
use jassert_core::{
    check_contains, check_contains_all, check_contains_property, check_equal, check_not_equal,
    contains, ArrayDiff, DiffOptions, Node, Pointer,
};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 5;
const KEYS: [&str; 6] = ["a", "b", "c", "a/b", "m~n", "0"];

/// Parses arbitrary text and checks that display output re-parses to an
/// equal document. Pointer parsing of the same text must not panic.
///
/// ```
/// jassert_fuzz::fuzz_parse(b"[1, 2.5, \"x\"]");
/// ```
pub fn fuzz_parse(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(pointer) = Pointer::parse(text) {
        let reparsed = Pointer::parse(&pointer.to_string());
        assert_eq!(reparsed.as_ref(), Ok(&pointer), "pointer display must re-parse");
    }
    let Ok(node) = Node::from_json_str(text) else {
        return;
    };
    let reparsed = Node::from_json_str(&node.to_string());
    assert!(matches!(reparsed, Ok(ref again) if *again == node), "display must re-parse to {node}");
    assert!(check_equal(Some(&node), Some(&node), &DiffOptions::default()).is_ok());
}

/// Diffs a random document against a mutated copy under both array
/// strategies and checks the diff invariants.
///
/// ```
/// jassert_fuzz::fuzz_diff(b"seed");
/// ```
pub fn fuzz_diff(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some((expected, actual)) = random_pair(&mut unstructured) else {
        return;
    };
    for strategy in [ArrayDiff::Indexed, ArrayDiff::Lcs] {
        let options = DiffOptions::default().with_array_diff(strategy);
        let diff = expected.diff(&actual, &options);
        assert_eq!(diff.is_empty(), expected == actual, "empty diff iff equal ({strategy})");
        assert_eq!(diff.is_empty(), expected.equals(&actual, &options));
        assert_eq!(first_difference(&expected, &actual, &options).as_ref(), diff.first());

        for op in &diff {
            let in_expected = op.path.resolve(&expected);
            let in_actual = op.path.resolve(&actual);
            match op.op {
                OpKind::Remove => assert_eq!(in_expected, op.value.as_ref(), "{op:?}"),
                OpKind::Add => assert_eq!(in_actual, op.value.as_ref(), "{op:?}"),
                OpKind::Replace => {
                    assert!(in_expected.is_some(), "{op:?}");
                    assert_eq!(in_actual, op.value.as_ref(), "{op:?}");
                }
            }
        }
    }
}

/// Runs the assertion predicates over random documents and checks that they
/// agree with each other.
///
/// ```
/// jassert_fuzz::fuzz_assertions(b"predicates");
/// ```
pub fn fuzz_assertions(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some((expected, actual)) = random_pair(&mut unstructured) else {
        return;
    };
    let options = DiffOptions::default();

    let equal = check_equal(Some(&expected), Some(&actual), &options).is_ok();
    let not_equal = check_not_equal(Some(&expected), Some(&actual), &options).is_ok();
    assert_ne!(equal, not_equal, "equal and not-equal must disagree");

    let elements = expected.as_array().unwrap_or_default();
    let array = actual.as_array();
    let all = check_contains_all(Some(elements), array, &options).is_ok();
    let each = elements.iter().all(|element| check_contains(Some(element), array, &options).is_ok());
    assert_eq!(all, each, "contains-all must decompose into contains");
    if let Some(items) = array {
        for item in items {
            assert!(contains(Some(item), array, &options));
        }
    }

    if let Ok(path) = random_path(&mut unstructured) {
        let result = check_contains_property(Some(&expected), &path, Some(&actual), &options);
        let resolved = path.resolve(&actual);
        assert_eq!(result.is_ok(), resolved.is_some_and(|found| found.equals(&expected, &options)));
    }
}

fn random_pair(unstructured: &mut Unstructured<'_>) -> Option<(Node, Node)> {
    let value = random_value(unstructured, 0).ok()?;
    let mutated = mutate(unstructured, &value, 0).ok()?;
    Some((Node::from_json_value(value).ok()?, Node::from_json_value(mutated).ok()?))
}

/// Copies `value` while randomly editing some of its members, so diffs stay
/// local instead of replacing the whole document.
fn mutate(
    unstructured: &mut Unstructured<'_>,
    value: &JsonValue,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    match unstructured.int_in_range::<u8>(0..=9)? {
        0 => return random_value(unstructured, depth),
        1..=5 => return Ok(value.clone()),
        _ => {}
    }
    match value {
        JsonValue::Array(items) => {
            let mut edited = Vec::with_capacity(items.len() + 1);
            for item in items {
                match unstructured.int_in_range::<u8>(0..=5)? {
                    0 => {}
                    1 => {
                        edited.push(random_value(unstructured, depth + 1)?);
                        edited.push(item.clone());
                    }
                    _ => edited.push(mutate(unstructured, item, depth + 1)?),
                }
            }
            Ok(JsonValue::Array(edited))
        }
        JsonValue::Object(map) => {
            let mut edited = JsonMap::new();
            for (key, item) in map {
                if unstructured.int_in_range::<u8>(0..=5)? != 0 {
                    edited.insert(key.clone(), mutate(unstructured, item, depth + 1)?);
                }
            }
            if unstructured.arbitrary()? {
                let key = random_key(unstructured)?;
                edited.insert(key, random_value(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Object(edited))
        }
        _ => json_leaf(unstructured),
    }
}

fn random_value(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }
    match unstructured.int_in_range::<u8>(0..=5)? {
        0..=3 => json_leaf(unstructured),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(random_value(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut map = JsonMap::new();
            for _ in 0..len {
                let key = random_key(unstructured)?;
                map.insert(key, random_value(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Object(map))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    match unstructured.int_in_range::<u8>(0..=3)? {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => {
            let small = unstructured.int_in_range::<i8>(-3..=3)?;
            let halves: bool = unstructured.arbitrary()?;
            let value = if halves { f64::from(small) / 2.0 } else { f64::from(small) };
            JsonNumber::from_f64(value).map(JsonValue::Number).ok_or(arbitrary::Error::IncorrectFormat)
        }
        _ => Ok(JsonValue::String(random_key(unstructured)?)),
    }
}

fn random_key(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let key = unstructured.choose(&KEYS)?;
    Ok((*key).to_owned())
}

fn random_path(unstructured: &mut Unstructured<'_>) -> Result<Pointer, arbitrary::Error> {
    let depth = unstructured.int_in_range::<u8>(0..=3)?;
    let mut pointer = Pointer::root();
    for _ in 0..depth {
        if unstructured.arbitrary()? {
            pointer.push(random_key(unstructured)?);
        } else {
            pointer.push(unstructured.int_in_range::<u8>(0..=3)?.to_string());
        }
    }
    Ok(pointer)
}
