//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_bean_derive() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/bean_ok.rs");
    t.pass("tests/trybuild/bean_methods_ok.rs");
}
