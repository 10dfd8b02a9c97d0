// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External script process execution.
//!
//! One run is one interpreter process. Stdout and stderr are each
//! drained by an independent reader task from the moment of spawn, so a
//! script producing large or interleaved output on both pipes cannot
//! deadlock. The terminal outcome is reported only after the process
//! has exited and both readers have drained to end-of-stream.

use crate::interpreter::Interpreter;
use opskit_core::{ParameterBinding, RunId, RunStatus, ScriptManifest};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Errors raised before or while supervising the script process
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The manifest points at a file that does not exist. Raised before
    /// any process is spawned; callers must not open a Running ledger
    /// record for a script that fails this check.
    #[error("script file not found: {0}")]
    ScriptNotFound(PathBuf),
    #[error("failed to spawn {interpreter}: {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },
    #[error("process wait failed: {0}")]
    Wait(#[source] std::io::Error),
}

/// Which pipe a line was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

opskit_core::simple_display! {
    OutputStream {
        Stdout => "stdout",
        Stderr => "stderr",
    }
}

/// One complete line of script output.
///
/// Delivered in program order per stream; no ordering is promised
/// between the two streams. Receivers may run on a different task than
/// the caller that started the run.
#[derive(Debug, Clone)]
pub struct OutputLine {
    pub stream: OutputStream,
    pub text: String,
}

/// Terminal result of one run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub status: RunStatus,
    /// None when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub output: String,
    pub error_output: Option<String>,
}

/// Executes one external interpreter process per submitted run.
///
/// No state is shared between runs; the runner itself is cheap to share
/// across a catalog session.
pub struct Runner {
    interpreter: Interpreter,
    catalog_dir: PathBuf,
}

impl Runner {
    pub fn new(interpreter: Interpreter, catalog_dir: impl Into<PathBuf>) -> Self {
        Self { interpreter, catalog_dir: catalog_dir.into() }
    }

    /// Run a manifest's script with the given bindings.
    ///
    /// Blocks (asynchronously) until the process reaches a terminal
    /// state. Every complete output line is sent over `output_tx` as it
    /// is produced; a dropped receiver does not interrupt the run.
    /// Cancelling `cancel` requests graceful termination, escalating to
    /// a forced kill after `OPSKIT_TERM_GRACE_MS` (default 2000ms);
    /// the outcome is then `Cancelled` regardless of the exit code.
    /// Cancellation is idempotent: a token cancelled twice behaves the
    /// same as once, and cancelling a finished run is a no-op.
    pub async fn run(
        &self,
        manifest: &ScriptManifest,
        bindings: &[ParameterBinding],
        output_tx: mpsc::Sender<OutputLine>,
        cancel: CancellationToken,
    ) -> Result<RunOutcome, RunError> {
        let script = &manifest.script_path;
        if !script.is_file() {
            return Err(RunError::ScriptNotFound(script.clone()));
        }

        let run_id = RunId::new();
        let mut cmd = tokio::process::Command::new(&self.interpreter.program);
        cmd.args(&self.interpreter.file_args)
            .arg(script)
            .args(opskit_runbook::to_args(bindings))
            .current_dir(&self.catalog_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| RunError::Spawn {
            interpreter: self.interpreter.program.clone(),
            source,
        })?;
        tracing::info!(
            run_id = %run_id,
            script = %manifest.name,
            pid = ?child.id(),
            "script process spawned"
        );

        // Both pipes get their own reader immediately so neither can
        // fill and stall the child.
        let stdout_buf = Arc::new(Mutex::new(String::new()));
        let stderr_buf = Arc::new(Mutex::new(String::new()));
        let mut stdout_task = drain_lines(
            child.stdout.take(),
            OutputStream::Stdout,
            output_tx.clone(),
            Arc::clone(&stdout_buf),
        );
        let mut stderr_task = drain_lines(
            child.stderr.take(),
            OutputStream::Stderr,
            output_tx,
            Arc::clone(&stderr_buf),
        );

        let mut cancelled = false;
        let wait_result = tokio::select! {
            res = child.wait() => res,
            _ = cancel.cancelled() => {
                cancelled = true;
                tracing::info!(run_id = %run_id, "cancellation requested, terminating script");
                shutdown(&mut child, &run_id).await
            }
        };

        // Drain to EOF before reporting: no result while output may
        // still be in flight. After a cancel the script may have left
        // descendants holding the pipes open, so that path bounds the
        // drain instead of waiting for EOF that may never come.
        if cancelled {
            let drain = async {
                let _ = (&mut stdout_task).await;
                let _ = (&mut stderr_task).await;
            };
            if tokio::time::timeout(drain_timeout(), drain).await.is_err() {
                tracing::warn!(run_id = %run_id, "output pipes still open after cancel, abandoning drain");
                stdout_task.abort();
                stderr_task.abort();
            }
        } else {
            let _ = stdout_task.await;
            let _ = stderr_task.await;
        }
        let output = stdout_buf.lock().clone();
        let error_output = stderr_buf.lock().clone();

        let status = wait_result.map_err(RunError::Wait)?;
        let exit_code = status.code();
        let run_status = if cancelled {
            RunStatus::Cancelled
        } else if exit_code == Some(0) {
            RunStatus::Completed
        } else {
            RunStatus::Failed
        };
        tracing::info!(
            run_id = %run_id,
            status = %run_status,
            exit_code = ?exit_code,
            "script process finished"
        );

        Ok(RunOutcome {
            status: run_status,
            exit_code,
            output,
            error_output: if error_output.is_empty() { None } else { Some(error_output) },
        })
    }

    pub fn catalog_dir(&self) -> &Path {
        &self.catalog_dir
    }
}

/// Request graceful termination, escalating to a forced kill when the
/// process does not exit within the grace window.
async fn shutdown(child: &mut Child, run_id: &RunId) -> std::io::Result<std::process::ExitStatus> {
    request_terminate(child);
    match tokio::time::timeout(term_grace(), child.wait()).await {
        Ok(res) => res,
        Err(_) => {
            tracing::warn!(run_id = %run_id, "script ignored termination request, killing");
            let _ = child.start_kill();
            child.wait().await
        }
    }
}

#[cfg(unix)]
fn request_terminate(child: &Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    // id() is None once the child has been reaped; nothing to signal then
    if let Some(pid) = child.id() {
        if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            tracing::debug!(pid, error = %e, "SIGTERM delivery failed");
        }
    }
}

#[cfg(not(unix))]
fn request_terminate(child: &Child) {
    // No graceful signal on this platform; the escalation kill in
    // `shutdown` bounds the latency.
    let _ = child;
}

/// Spawn a reader task that forwards complete lines to `tx` and
/// accumulates the captured text into `buffer` until end-of-stream.
fn drain_lines<R>(
    pipe: Option<R>,
    stream: OutputStream,
    tx: mpsc::Sender<OutputLine>,
    buffer: Arc<Mutex<String>>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let Some(pipe) = pipe else {
            return;
        };
        let mut lines = BufReader::new(pipe).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            {
                let mut captured = buffer.lock();
                captured.push_str(&line);
                captured.push('\n');
            }
            // Receiver may be gone; keep capturing regardless
            let _ = tx.send(OutputLine { stream, text: line }).await;
        }
    })
}

fn term_grace() -> Duration {
    std::env::var("OPSKIT_TERM_GRACE_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(2))
}

fn drain_timeout() -> Duration {
    std::env::var("OPSKIT_DRAIN_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(500))
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
