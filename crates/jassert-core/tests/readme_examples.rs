use jassert_core::{
    assert_contains_all, ArrayDiff, DiffOptions, FailureKind, JsonAssert, Node, RenderConfig,
};

#[test]
fn jassert_core_readme_example() -> Result<(), Box<dyn std::error::Error>> {
    let asserter = JsonAssert::new(DiffOptions::default().with_array_diff(ArrayDiff::Lcs));

    asserter.equal(r#"{"a":1,"b":[1,2]}"#, r#"{"b":[1,2],"a":1}"#)?;

    let err = asserter.equal(r#"{"items":[1,2,3]}"#, r#"{"items":[1,3]}"#).unwrap_err();
    let failure = err.failure().expect("assertion failure");
    assert_eq!(failure.kind(), FailureKind::Missing);
    assert_eq!(failure.message(), "Missing: /items/1");

    assert_contains_all("[3,1]", "[1,2,3]")?;
    Ok(())
}

#[test]
fn top_level_readme_quickstart() -> Result<(), Box<dyn std::error::Error>> {
    let expected = Node::from_json_str(r#"{"count":1,"tags":["a"]}"#)?;
    let actual = Node::from_json_str(r#"{"count":2,"tags":["a"],"extra":true}"#)?;

    let diff = expected.diff(&actual, &DiffOptions::default());
    assert_eq!(diff.len(), 2);
    assert_eq!(diff.render(&RenderConfig::default()), "@ /count\n~ 2\n@ /extra\n+ true\n");
    Ok(())
}
