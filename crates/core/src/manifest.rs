// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script manifest and parameter types.
//!
//! A manifest is the declarative description of one runnable script: where
//! the script file lives, what an operator should know before running it,
//! and which parameters it accepts. Manifests are parsed once at catalog
//! load and are immutable value snapshots thereafter.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating a parsed manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest '{manifest}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { manifest: String, parameter: String },
    #[error("manifest has an empty name")]
    EmptyName,
    #[error("manifest '{0}' has an empty scriptFile")]
    EmptyScriptPath(String),
}

/// Declared type of a parameter. Advisory only: the engine always
/// marshals values to text; the type drives how a front end presents
/// the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    #[default]
    String,
    Integer,
    Boolean,
    Choice,
}

crate::simple_display! {
    ParameterKind {
        String => "string",
        Integer => "integer",
        Boolean => "boolean",
        Choice => "choice",
    }
}

/// One declared script input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    /// Flag name passed to the script (e.g. `-Username <value>`)
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, rename = "type")]
    pub kind: ParameterKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<String>,
    /// Finite set of allowed values, only meaningful for choice pickers
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    /// Advisory validation pattern; never enforced by the engine
    #[serde(default)]
    pub validation: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ParameterSpec {
    /// Label to present for this parameter (display name, or the flag
    /// name when no display name was declared).
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// Declarative description of a runnable script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptManifest {
    /// Unique within a catalog; stable identifier
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Path to the script file. Relative paths are resolved against the
    /// catalog directory at load time.
    #[serde(rename = "scriptFile")]
    pub script_path: PathBuf,
    /// Advisory: modules the script expects on the host. Shown to the
    /// operator, never enforced.
    #[serde(default)]
    pub required_modules: Vec<String>,
    /// Advisory: permissions the operator's session needs
    #[serde(default)]
    pub required_permissions: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl ScriptManifest {
    /// Check the invariants a well-formed manifest must hold.
    ///
    /// Catalog load calls this after parsing; a manifest that fails is
    /// skipped, not fatal.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::EmptyName);
        }
        if self.script_path.as_os_str().is_empty() {
            return Err(ManifestError::EmptyScriptPath(self.name.clone()));
        }
        let mut seen = HashSet::new();
        for spec in &self.parameters {
            if !seen.insert(spec.name.as_str()) {
                return Err(ManifestError::DuplicateParameter {
                    manifest: self.name.clone(),
                    parameter: spec.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Runtime value for one [`ParameterSpec`], validated and ready for
/// argument serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBinding {
    pub name: String,
    pub value: String,
}

impl ParameterBinding {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    /// True when the bound value is blank (omitted from the argument
    /// list so the script sees its own defaults).
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
