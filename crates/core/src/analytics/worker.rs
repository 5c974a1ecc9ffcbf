//! Subprocess supervision for analytical workers.
//!
//! Spawns one worker process per job, captures stdout and stderr in
//! full, and enforces a wall-clock timeout. A job's downstream stages
//! need the complete output document, so streams are accumulated rather
//! than processed line by line.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::invocation::WorkerInvocation;

/// Maximum stdout or stderr size captured per stream (10 MiB).
///
/// Output exceeding this limit is truncated to prevent memory exhaustion
/// from a runaway worker.
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Captured output of a worker that exited cleanly (code 0).
///
/// Non-clean exits are represented as [`WorkerError`] variants instead,
/// so partial stdout from a failed worker can never be mistaken for a
/// usable result.
#[derive(Debug, Clone)]
pub struct WorkerOutput {
    /// Complete stdout captured from the process.
    pub stdout: String,
    /// Complete stderr captured from the process.
    pub stderr: String,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Terminal failure states of a worker invocation.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// The worker process could not be started (missing or unauthorized
    /// executable).
    #[error("Failed to start worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// An I/O error occurred while supervising a running worker.
    #[error("I/O error while supervising worker: {0}")]
    Io(#[source] std::io::Error),

    /// The worker exceeded its configured timeout and was killed.
    #[error("Worker timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed wall-clock time before the process was killed.
        elapsed_ms: u64,
    },

    /// The worker ran but exited with a non-zero code or was killed by a
    /// signal. Carries the captured diagnostic stream verbatim.
    #[error("Worker exited with code {exit_code}: {stderr}")]
    ExitFailure {
        /// Process exit code (`-1` if killed by signal).
        exit_code: i32,
        /// Captured stderr output, or `"Unknown error"` if the worker
        /// produced no diagnostics.
        stderr: String,
    },
}

/// Run a worker invocation to completion, capturing both output streams.
///
/// Blocks the calling task until the process exits or `timeout` elapses.
/// On timeout the child is killed (`kill_on_drop`) and reaped; a timed-out
/// invocation never yields partial output. No retries happen at this
/// layer -- a failed invocation is reported upward as-is.
pub async fn run(
    invocation: &WorkerInvocation,
    timeout: Duration,
) -> Result<WorkerOutput, WorkerError> {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();

    let mut child = cmd.spawn().map_err(WorkerError::Spawn)?;

    // Take the stream handles and read them in spawned tasks so we can
    // still call `child.wait()` (which borrows `&mut child`).
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_task = tokio::spawn(async move { read_stream(stdout_handle).await });
    let stderr_task = tokio::spawn(async move { read_stream(stderr_handle).await });

    // Wait for the child with a timeout. If the timeout fires, `child` is
    // dropped with `kill_on_drop(true)`, killing the process.
    let wait_result = tokio::time::timeout(timeout, child.wait()).await;

    match wait_result {
        Ok(Ok(status)) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            let stdout_bytes = stdout_task.await.unwrap_or_default();
            let stderr_bytes = stderr_task.await.unwrap_or_default();
            let stdout = String::from_utf8_lossy(&stdout_bytes).into_owned();
            let stderr = String::from_utf8_lossy(&stderr_bytes).into_owned();

            if status.success() {
                Ok(WorkerOutput {
                    stdout,
                    stderr,
                    duration_ms,
                })
            } else {
                let detail = stderr.trim();
                Err(WorkerError::ExitFailure {
                    exit_code: status.code().unwrap_or(-1),
                    stderr: if detail.is_empty() {
                        "Unknown error".to_string()
                    } else {
                        detail.to_string()
                    },
                })
            }
        }
        Ok(Err(e)) => Err(WorkerError::Io(e)),
        Err(_elapsed) => Err(WorkerError::Timeout {
            elapsed_ms: start.elapsed().as_millis() as u64,
        }),
    }
}

/// Read an entire output stream into a byte buffer, capped at [`MAX_OUTPUT_BYTES`].
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = (&mut h)
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buf)
            .await;
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
