// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter binding and argument serialization.
//!
//! Pure validation and transformation: declared specs plus user-entered
//! values become an ordered binding set, then an argv fragment for the
//! interpreter process. Values are always passed as discrete argument
//! elements, never concatenated into a command string, so quotes and
//! spaces in a value reach the script literally and there is no shell
//! layer to inject through.

use indexmap::IndexMap;
use opskit_core::{ParameterBinding, ParameterSpec};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from binding user values against a parameter list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("required parameter '{0}' is missing")]
    MissingRequired(String),
}

/// Bind user-entered values against the declared specs, in declared
/// order.
///
/// A spec with no supplied value falls back to its declared default.
/// A `required` spec whose effective value is blank fails the whole
/// bind; submission must be rejected before any process is spawned.
/// Non-required blank values are bound (so they appear in the recorded
/// parameter set) but are omitted from the serialized argument list.
pub fn bind(
    specs: &[ParameterSpec],
    values: &HashMap<String, String>,
) -> Result<Vec<ParameterBinding>, BindError> {
    let mut bindings = Vec::with_capacity(specs.len());
    for spec in specs {
        let value = values
            .get(&spec.name)
            .cloned()
            .or_else(|| spec.default.clone())
            .unwrap_or_default();
        if spec.required && value.trim().is_empty() {
            return Err(BindError::MissingRequired(spec.name.clone()));
        }
        bindings.push(ParameterBinding::new(spec.name.clone(), value));
    }
    Ok(bindings)
}

/// Serialize bindings into the interpreter's argument convention: one
/// `-Name` flag element followed by one value element per non-blank
/// binding.
pub fn to_args(bindings: &[ParameterBinding]) -> Vec<String> {
    let mut args = Vec::with_capacity(bindings.len() * 2);
    for binding in bindings {
        if binding.is_blank() {
            continue;
        }
        args.push(format!("-{}", binding.name));
        args.push(binding.value.clone());
    }
    args
}

/// Serialize bindings as a flat JSON object for the execution ledger.
///
/// Insertion order is preserved so the recorded payload reads in the
/// manifest's declared parameter order.
pub fn serialize_parameters(bindings: &[ParameterBinding]) -> String {
    let map: IndexMap<&str, &str> = bindings
        .iter()
        .map(|b| (b.name.as_str(), b.value.as_str()))
        .collect();
    serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
#[path = "binder_tests.rs"]
mod tests;
