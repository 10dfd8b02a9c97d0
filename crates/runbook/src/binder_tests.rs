// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn spec(name: &str, required: bool, default: Option<&str>) -> ParameterSpec {
    let json = serde_json::json!({
        "name": name,
        "required": required,
        "default": default,
    });
    serde_json::from_value(json).unwrap()
}

fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn binds_in_declared_order() {
    let specs = vec![
        spec("Username", true, None),
        spec("Role", false, Some("standard")),
        spec("Notes", false, None),
    ];
    let bindings =
        bind(&specs, &values(&[("Notes", "hi"), ("Username", "alice")])).unwrap();
    let names: Vec<_> = bindings.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Username", "Role", "Notes"]);
    assert_eq!(bindings[1].value, "standard");
}

#[yare::parameterized(
    absent     = { &[] },
    empty      = { &[("Username", "")] },
    whitespace = { &[("Username", "   ")] },
)]
fn missing_required_rejects(supplied: &[(&str, &str)]) {
    let specs = vec![spec("Username", true, None)];
    let err = bind(&specs, &values(supplied)).unwrap_err();
    assert_eq!(err, BindError::MissingRequired("Username".to_string()));
}

#[test]
fn required_satisfied_by_default() {
    let specs = vec![spec("Tier", true, Some("basic"))];
    let bindings = bind(&specs, &values(&[])).unwrap();
    assert_eq!(bindings[0].value, "basic");
}

#[test]
fn blank_optional_is_bound_but_omitted_from_args() {
    let specs = vec![spec("Username", true, None), spec("Notes", false, None)];
    let bindings = bind(&specs, &values(&[("Username", "alice")])).unwrap();
    assert_eq!(bindings.len(), 2);
    assert_eq!(to_args(&bindings), vec!["-Username", "alice"]);
}

#[test]
fn args_pass_quotes_and_spaces_literally() {
    let bindings = vec![
        ParameterBinding::new("DisplayName", r#"Alice "Ops" O'Brien"#),
        ParameterBinding::new("Title", "Staff Engineer"),
    ];
    assert_eq!(
        to_args(&bindings),
        vec![
            "-DisplayName",
            r#"Alice "Ops" O'Brien"#,
            "-Title",
            "Staff Engineer",
        ]
    );
}

#[test]
fn serialize_preserves_declared_order() {
    let bindings = vec![
        ParameterBinding::new("Username", "alice"),
        ParameterBinding::new("Role", "admin"),
        ParameterBinding::new("Notes", ""),
    ];
    assert_eq!(
        serialize_parameters(&bindings),
        r#"{"Username":"alice","Role":"admin","Notes":""}"#
    );
}

#[test]
fn serialize_empty_bindings() {
    assert_eq!(serialize_parameters(&[]), "{}");
}
