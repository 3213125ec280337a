//! Application service: validate-then-run pipeline for free-form commands.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Nothing reaches the shell without an `Allowed` verdict.

use anyhow::Result;
use dockyard_common::{CommandState, ExecutionReport, ExecutionResult};

use crate::application::ports::ShellRunner;
use crate::domain::command::{ValidationVerdict, validate_command};
use crate::domain::error::{CommandError, ExecError};

/// Tracks one command through its states and logs every move.
struct Lifecycle<'a> {
    command: &'a str,
    state: CommandState,
}

impl<'a> Lifecycle<'a> {
    fn new(command: &'a str) -> Self {
        tracing::debug!(command, state = ?CommandState::Proposed, "command proposed");
        Self {
            command,
            state: CommandState::Proposed,
        }
    }

    fn advance(&mut self, next: CommandState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {:?} -> {next:?}",
            self.state
        );
        tracing::debug!(command = self.command, from = ?self.state, to = ?next, "command transition");
        self.state = next;
    }

    fn finish(self, result: ExecutionResult) -> ExecutionReport {
        ExecutionReport {
            command: self.command.to_string(),
            state: self.state,
            result,
        }
    }
}

/// Validate `command` and, if allowed, run it.
///
/// The validator sees the input exactly as given; the shell gets it trimmed.
/// Rejections and run failures are reported, not returned as errors.
///
/// # Errors
///
/// Returns [`CommandError::Empty`] for blank input; it never reaches the
/// validator.
pub async fn execute(shell: &impl ShellRunner, input: &str) -> Result<ExecutionReport> {
    let command = input.trim();
    if command.is_empty() {
        return Err(CommandError::Empty.into());
    }

    let mut lifecycle = Lifecycle::new(command);
    if let ValidationVerdict::Rejected(rejection) = validate_command(input) {
        lifecycle.advance(CommandState::Rejected);
        tracing::info!(command, reason = rejection.reason(), "command rejected");
        return Ok(lifecycle.finish(ExecutionResult::failure(rejection.reason())));
    }
    lifecycle.advance(CommandState::Validated);

    lifecycle.advance(CommandState::Running);
    let report = match shell.run_shell(command).await {
        Ok(result) => {
            lifecycle.advance(CommandState::Succeeded);
            lifecycle.finish(result)
        }
        Err(e) => {
            let next = match e.downcast_ref::<ExecError>() {
                Some(ExecError::TimedOut { .. }) => CommandState::TimedOut,
                _ => CommandState::Failed,
            };
            tracing::warn!(command, error = %format!("{e:#}"), "command failed");
            lifecycle.advance(next);
            lifecycle.finish(ExecutionResult::failure(format!("{e:#}")))
        }
    };
    Ok(report)
}
