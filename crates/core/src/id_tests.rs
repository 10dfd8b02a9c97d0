// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::record::RunId;

#[test]
fn new_ids_carry_prefix_and_are_unique() {
    let a = RunId::new();
    let b = RunId::new();
    assert!(a.as_str().starts_with("run-"));
    assert_eq!(a.as_str().len(), 23);
    assert_ne!(a, b);
}

#[test]
fn from_string_round_trips() {
    let id = RunId::from_string("run-abc123");
    assert_eq!(id.as_str(), "run-abc123");
    assert_eq!(id.to_string(), "run-abc123");
    assert_eq!(id, "run-abc123");
}

#[test]
fn serde_is_transparent() {
    let id = RunId::from_string("run-xyz");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"run-xyz\"");
    let back: RunId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
