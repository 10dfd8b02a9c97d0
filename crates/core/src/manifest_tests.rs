// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const FULL_MANIFEST: &str = r#"{
  "name": "new-user",
  "description": "Provision a directory user",
  "scriptFile": "new-user.ps1",
  "requiredModules": ["Microsoft.Graph.Users"],
  "requiredPermissions": ["User.ReadWrite.All"],
  "parameters": [
    {
      "name": "Username",
      "displayName": "User principal name",
      "type": "string",
      "required": true,
      "description": "UPN for the new account"
    },
    {
      "name": "Role",
      "type": "choice",
      "choices": ["standard", "admin"],
      "default": "standard"
    }
  ]
}"#;

#[test]
fn parses_full_descriptor() {
    let manifest: ScriptManifest = serde_json::from_str(FULL_MANIFEST).unwrap();
    assert_eq!(manifest.name, "new-user");
    assert_eq!(manifest.script_path, PathBuf::from("new-user.ps1"));
    assert_eq!(manifest.required_modules, vec!["Microsoft.Graph.Users"]);
    assert_eq!(manifest.parameters.len(), 2);

    let username = &manifest.parameters[0];
    assert!(username.required);
    assert_eq!(username.kind, ParameterKind::String);
    assert_eq!(username.label(), "User principal name");

    let role = &manifest.parameters[1];
    assert_eq!(role.kind, ParameterKind::Choice);
    assert_eq!(role.default.as_deref(), Some("standard"));
    assert_eq!(role.label(), "Role");
    manifest.validate().unwrap();
}

#[test]
fn optional_fields_use_defaults() {
    let manifest: ScriptManifest = serde_json::from_str(
        r#"{"name": "noop", "scriptFile": "noop.ps1", "parameters": [{"name": "Depth"}]}"#,
    )
    .unwrap();
    assert_eq!(manifest.description, "");
    assert!(manifest.required_modules.is_empty());
    let param = &manifest.parameters[0];
    assert_eq!(param.kind, ParameterKind::String);
    assert!(!param.required);
    assert!(param.default.is_none());
    assert!(param.choices.is_none());
}

#[test]
fn unknown_fields_are_ignored() {
    let manifest: ScriptManifest = serde_json::from_str(
        r#"{"name": "x", "scriptFile": "x.ps1", "author": "someone", "version": 3}"#,
    )
    .unwrap();
    assert_eq!(manifest.name, "x");
}

#[test]
fn validate_rejects_duplicate_parameter_names() {
    let manifest: ScriptManifest = serde_json::from_str(
        r#"{"name": "dup", "scriptFile": "d.ps1",
            "parameters": [{"name": "A"}, {"name": "A"}]}"#,
    )
    .unwrap();
    let err = manifest.validate().unwrap_err();
    assert!(matches!(
        err,
        ManifestError::DuplicateParameter { ref parameter, .. } if parameter == "A"
    ));
}

#[yare::parameterized(
    empty_name   = { r#"{"name": "  ", "scriptFile": "x.ps1"}"# },
    empty_script = { r#"{"name": "x", "scriptFile": ""}"# },
)]
fn validate_rejects_blank_identity(json: &str) {
    let manifest: ScriptManifest = serde_json::from_str(json).unwrap();
    assert!(manifest.validate().is_err());
}

#[test]
fn binding_blankness() {
    assert!(ParameterBinding::new("A", "").is_blank());
    assert!(ParameterBinding::new("A", "   ").is_blank());
    assert!(!ParameterBinding::new("A", "value").is_blank());
}
