// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `opskit run` — execute one catalog script and record the run.
//!
//! Control flow: catalog lookup → bind → existence preflight → open the
//! ledger record → stream the process → close the record with the
//! terminal status. The Running record is only opened once the script
//! file is known to exist, so a bad manifest never leaves a dangling
//! record, and every path after `open` closes the record exactly once.

use crate::exit_error::ExitError;
use anyhow::{bail, Result};
use opskit_core::RunStatus;
use opskit_engine::{Interpreter, OutputStream, Runner};
use opskit_runbook::Catalog;
use opskit_storage::Ledger;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub async fn handle(name: &str, params: &[String]) -> Result<()> {
    let catalog = Catalog::load(&crate::env::scripts_dir());
    let Some(manifest) = catalog.get(name) else {
        bail!("unknown script '{}'; run 'opskit scripts' to list the catalog", name);
    };

    let values = parse_params(params)?;
    let bindings = opskit_runbook::bind(&manifest.parameters, &values)
        .map_err(|e| ExitError::new(2, e.to_string()))?;

    // Advisory metadata, shown before anything runs
    if !manifest.required_modules.is_empty() {
        eprintln!("requires modules: {}", manifest.required_modules.join(", "));
    }
    if !manifest.required_permissions.is_empty() {
        eprintln!("requires permissions: {}", manifest.required_permissions.join(", "));
    }

    // Existence preflight comes before the ledger record is opened: no
    // Running record may exist for a script that cannot be found.
    if !manifest.script_path.is_file() {
        bail!("script file not found: {}", manifest.script_path.display());
    }

    let store = super::open_store()?;
    let operator = crate::env::operator_account();
    let serialized = opskit_runbook::serialize_parameters(&bindings);
    let exec_id = store.open(&manifest.name, &serialized)?;
    store.log_action("runbook", "script started", Some(&manifest.name), operator.as_deref())?;

    let runner = Runner::new(Interpreter::resolve().await, catalog.dir());

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    // Script stdout goes to our stdout, script stderr to our stderr,
    // each in its own order as the process produces it.
    let (tx, mut rx) = mpsc::channel::<opskit_engine::OutputLine>(256);
    let printer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            match line.stream {
                OutputStream::Stdout => println!("{}", line.text),
                OutputStream::Stderr => eprintln!("{}", line.text),
            }
        }
    });

    let result = runner.run(manifest, &bindings, tx, cancel).await;
    let _ = printer.await;

    match result {
        Ok(outcome) => {
            store.close(
                exec_id,
                outcome.status,
                &outcome.output,
                outcome.error_output.as_deref(),
            )?;
            let action = match outcome.status {
                RunStatus::Completed => "script completed",
                RunStatus::Cancelled => "script cancelled",
                _ => "script failed",
            };
            store.log_action("runbook", action, Some(&manifest.name), operator.as_deref())?;

            match outcome.status {
                RunStatus::Cancelled => Err(ExitError::new(130, "execution cancelled").into()),
                RunStatus::Failed => {
                    let code = outcome
                        .exit_code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "terminated by signal".to_string());
                    Err(ExitError::new(1, format!("script exited with code {code}")).into())
                }
                // The runner never reports Running
                _ => Ok(()),
            }
        }
        Err(e) => {
            store.close(exec_id, RunStatus::Failed, "", Some(&e.to_string()))?;
            store.log_action("runbook", "script failed", Some(&manifest.name), operator.as_deref())?;
            Err(ExitError::new(1, e.to_string()).into())
        }
    }
}

/// Parse repeated `KEY=VALUE` arguments into a value map.
fn parse_params(params: &[String]) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();
    for param in params {
        let Some((key, value)) = param.split_once('=') else {
            bail!("invalid parameter '{}': expected KEY=VALUE", param);
        };
        if key.is_empty() {
            bail!("invalid parameter '{}': empty key", param);
        }
        values.insert(key.to_string(), value.to_string());
    }
    Ok(values)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
