// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn manifest(json: serde_json::Value) -> ScriptManifest {
    serde_json::from_value(json).unwrap()
}

#[test]
fn parameter_summary_marks_required() {
    let m = manifest(serde_json::json!({
        "name": "new-user",
        "scriptFile": "new-user.ps1",
        "parameters": [
            {"name": "Username", "required": true},
            {"name": "Role"},
        ]
    }));
    assert_eq!(parameter_summary(&m), "Username (req), Role");
}

#[test]
fn parameter_summary_empty_is_dash() {
    let m = manifest(serde_json::json!({"name": "noop", "scriptFile": "noop.ps1"}));
    assert_eq!(parameter_summary(&m), "-");
}

#[yare::parameterized(
    short     = { "hello", 10, "hello" },
    exact     = { "exactly10!", 10, "exactly10!" },
    truncated = { "a description that runs long", 10, "a descrip…" },
)]
fn truncate_cases(input: &str, max: usize, expected: &str) {
    assert_eq!(truncate(input, max), expected);
}
