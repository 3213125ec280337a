//! `dockyard exec`: run one free-form command through the host shell.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use dockyard_common::{CommandState, ExecutionReport};

use crate::app::AppContext;
use crate::application::ports::ShellRunner;
use crate::application::services::command_exec;

/// Arguments for the exec command.
#[derive(Args)]
#[command(trailing_var_arg = true)]
pub struct ExecArgs {
    /// Command line to run; words are joined with single spaces
    #[arg(allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Validate and run a command line through the host shell.
///
/// # Errors
///
/// Returns an error if the command is empty or the result cannot be rendered.
pub async fn run(app: &AppContext, args: &ExecArgs, shell: &impl ShellRunner) -> Result<ExitCode> {
    let command = args.command.join(" ");
    let report = command_exec::execute(shell, &command).await?;
    finish(app, &report)
}

/// Render a report and map its final state to an exit code.
pub(crate) fn finish(app: &AppContext, report: &ExecutionReport) -> Result<ExitCode> {
    app.renderer().render_report(report)?;
    Ok(exit_code(report.state))
}

/// Only a command that ran to completion counts as success.
#[must_use]
pub fn exit_code(state: CommandState) -> ExitCode {
    match state {
        CommandState::Succeeded => ExitCode::SUCCESS,
        CommandState::Rejected => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
