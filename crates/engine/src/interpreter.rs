// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script interpreter resolution.
//!
//! Scripts are PowerShell artifacts; the runner prefers the
//! cross-platform `pwsh` binary and falls back to legacy `powershell`
//! when the probe fails. `OPSKIT_INTERPRETER` overrides the probe with a
//! raw program (no file-invocation preamble), which is also how tests
//! stay hermetic on hosts without PowerShell.

use std::process::Stdio;
use std::time::Duration;

/// A resolved interpreter: the program to spawn plus the argument
/// preamble that precedes the script path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub program: String,
    pub file_args: Vec<String>,
}

impl Interpreter {
    /// An interpreter invoked as `program <script> [args...]` with no
    /// preamble.
    pub fn raw(program: impl Into<String>) -> Self {
        Self { program: program.into(), file_args: Vec::new() }
    }

    /// A PowerShell host invoked non-interactively.
    fn powershell(program: &str) -> Self {
        Self {
            program: program.to_string(),
            file_args: ["-NoProfile", "-ExecutionPolicy", "Bypass", "-File"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Locate a capable interpreter on the host.
    ///
    /// Probe failure is not an error, it simply falls back. The result
    /// should be resolved once and reused for the catalog session.
    pub async fn resolve() -> Interpreter {
        if let Ok(program) = std::env::var("OPSKIT_INTERPRETER") {
            if !program.trim().is_empty() {
                tracing::debug!(%program, "interpreter override in effect");
                return Interpreter::raw(program);
            }
        }
        if probe("pwsh", probe_timeout()).await {
            Interpreter::powershell("pwsh")
        } else {
            tracing::debug!("pwsh probe failed, falling back to powershell");
            Interpreter::powershell("powershell")
        }
    }
}

/// Check that `program -Version` runs and exits zero within the timeout.
async fn probe(program: &str, timeout: Duration) -> bool {
    let mut cmd = tokio::process::Command::new(program);
    cmd.arg("-Version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            tracing::debug!(%program, error = %e, "interpreter probe spawn failed");
            return false;
        }
    };

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output.status.success(),
        Ok(Err(e)) => {
            tracing::debug!(%program, error = %e, "interpreter probe wait failed");
            false
        }
        Err(_) => {
            tracing::debug!(%program, "interpreter probe timed out");
            false
        }
    }
}

fn probe_timeout() -> Duration {
    std::env::var("OPSKIT_PROBE_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(3))
}

#[cfg(test)]
#[path = "interpreter_tests.rs"]
mod tests;
