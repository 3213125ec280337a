//! Infrastructure implementation of the `ShellRunner` port.
//!
//! Hands a command line to the host shell through any `CommandRunner`,
//! then shapes what came back: stdout before stderr, a 2000-character cap
//! and one retry through the alternate shell when the output is mis-decoded.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use dockyard_common::ExecutionResult;

use crate::application::ports::{CommandRunner, ShellRunner};
use crate::domain::command::{
    COMMAND_TIMEOUT, MAX_OUTPUT_CHARS, looks_garbled, select_output, truncate_output,
};
use crate::domain::shell::{ShellKind, ShellProfile};

pub struct ShellCommandRunner<R> {
    runner: R,
    profile: ShellProfile,
    timeout: Duration,
}

impl<R: CommandRunner> ShellCommandRunner<R> {
    /// Host shell profile and the 30 s command timeout.
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self::with_profile(runner, ShellProfile::host(), COMMAND_TIMEOUT)
    }

    #[must_use]
    pub fn with_profile(runner: R, profile: ShellProfile, timeout: Duration) -> Self {
        Self {
            runner,
            profile,
            timeout,
        }
    }

    async fn invoke(&self, shell: ShellKind, command: &str) -> Result<Output> {
        let inv = shell.invocation(command);
        let args: Vec<&str> = inv.args.iter().map(String::as_str).collect();
        self.runner
            .run_with_env(inv.program, &args, &inv.env, self.timeout)
            .await
    }
}

impl<R: CommandRunner> ShellRunner for ShellCommandRunner<R> {
    async fn run_shell(&self, command: &str) -> Result<ExecutionResult> {
        let output = self.invoke(self.profile.primary, command).await?;
        let mut text = select_output(
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        );

        if looks_garbled(&text)
            && let Some(alternate) = self.profile.fallback
        {
            tracing::debug!(?alternate, "output mis-decoded, retrying in alternate shell");
            match self.invoke(alternate, command).await {
                Ok(retry) if !retry.stdout.is_empty() => {
                    text = String::from_utf8_lossy(&retry.stdout).into_owned();
                }
                Ok(_) => tracing::debug!("alternate shell produced no stdout"),
                Err(e) => tracing::debug!(error = %format!("{e:#}"), "alternate shell failed"),
            }
        }

        let (shaped, truncated) = truncate_output(&text);
        Ok(if truncated {
            ExecutionResult::ok_with_notice(
                shaped,
                format!("output truncated to {MAX_OUTPUT_CHARS} characters"),
            )
        } else {
            ExecutionResult::ok(shaped)
        })
    }
}
