//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with a guaranteed timeout, an output cap and
//! kill on all platforms.

use std::process::{Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::application::ports::CommandRunner;
use crate::domain::command::MAX_OUTPUT_BYTES;
use crate::domain::error::ExecError;

/// Default timeout for external CLI calls (list, ps, start, stop, ...).
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(30);

const READ_CHUNK: usize = 8 * 1024;

/// Production `CommandRunner` backed by `tokio::process`
/// with guaranteed timeout and kill on all platforms.
///
/// On Windows, dropping a timed-out `.output()` future does NOT kill the
/// child process; the OS process keeps running. This implementation calls
/// `child.kill()` explicitly on timeout and when the output cap is hit.
pub struct TokioCommandRunner {
    timeout: Duration,
    max_output: usize,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            max_output: MAX_OUTPUT_BYTES,
        }
    }

    /// Override the combined stdout+stderr cap.
    #[must_use]
    pub fn with_output_limit(mut self, bytes: usize) -> Self {
        self.max_output = bytes;
        self
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        self.run_with_env(program, args, &[], timeout).await
    }

    async fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Output> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .envs(env.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;
        tracing::debug!(program, ?args, timeout_secs = timeout.as_secs(), "spawned");

        let stdout_handle = child.stdout.take();
        let stderr_handle = child.stderr.take();
        let used = AtomicUsize::new(0);
        let limit = self.max_output;

        // Both pipes are drained while waiting so a chatty child cannot
        // block on a full pipe.
        let outcome = tokio::time::timeout(timeout, async {
            tokio::try_join!(
                async {
                    child
                        .wait()
                        .await
                        .with_context(|| format!("waiting for {program}"))
                },
                read_capped(stdout_handle, &used, limit, program),
                read_capped(stderr_handle, &used, limit, program),
            )
        })
        .await;

        match outcome {
            Ok(Ok((status, stdout, stderr))) => Ok(Output {
                status,
                stdout,
                stderr,
            }),
            Ok(Err(e)) => {
                let _ = child.kill().await;
                tracing::warn!(program, error = %e, "process aborted");
                Err(e)
            }
            Err(_) => {
                let _ = child.kill().await;
                tracing::warn!(program, timeout_secs = timeout.as_secs(), "process timed out");
                Err(ExecError::TimedOut {
                    program: program.to_string(),
                    secs: timeout.as_secs(),
                }
                .into())
            }
        }
    }
}

/// Read a pipe to EOF, failing once the shared byte budget is exceeded.
async fn read_capped<R: AsyncRead + Unpin>(
    handle: Option<R>,
    used: &AtomicUsize,
    limit: usize,
    program: &str,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let Some(mut reader) = handle else {
        return Ok(buf);
    };
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let n = reader
            .read(&mut chunk)
            .await
            .with_context(|| format!("reading output of {program}"))?;
        if n == 0 {
            return Ok(buf);
        }
        if used.fetch_add(n, Ordering::Relaxed) + n > limit {
            return Err(ExecError::OutputLimitExceeded {
                program: program.to_string(),
                limit,
            }
            .into());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}
