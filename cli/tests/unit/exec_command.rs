//! Unit tests for `dockyard exec`: validation gate, exit codes and state.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::process::ExitCode;

use dockyard_cli::application::services::command_exec;
use dockyard_cli::commands::exec::{self, ExecArgs};
use dockyard_cli::domain::error::CommandError;
use dockyard_common::CommandState;

use crate::helpers::{app, assert_exit};
use crate::mocks::{BrokenShell, RecordingShell};

fn args(words: &[&str]) -> ExecArgs {
    ExecArgs {
        command: words.iter().map(ToString::to_string).collect(),
    }
}

#[tokio::test]
async fn test_exec_joins_words_and_runs_once() {
    let shell = RecordingShell::replying("hi\n");
    let code = exec::run(&app(false), &args(&["echo", "hi"]), &shell)
        .await
        .expect("exec");
    assert_exit(code, ExitCode::SUCCESS);
    assert_eq!(shell.calls(), vec!["echo hi"]);
}

#[tokio::test]
async fn test_exec_dangerous_command_never_reaches_shell() {
    let shell = RecordingShell::replying("");
    let code = exec::run(&app(false), &args(&["sudo", "ls"]), &shell)
        .await
        .expect("exec");
    assert_exit(code, ExitCode::from(2));
    assert!(shell.calls().is_empty());
}

#[tokio::test]
async fn test_exec_rejection_in_json_mode_still_exits_nonzero() {
    let shell = RecordingShell::replying("");
    let code = exec::run(&app(true), &args(&["rm", "-rf", "/tmp/x"]), &shell)
        .await
        .expect("exec");
    assert_exit(code, ExitCode::from(2));
    assert!(shell.calls().is_empty());
}

#[tokio::test]
async fn test_exec_empty_command_is_an_error() {
    let shell = RecordingShell::replying("");
    let err = exec::run(&app(false), &args(&["  "]), &shell)
        .await
        .err()
        .expect("empty command should fail");
    assert!(matches!(
        err.downcast_ref::<CommandError>(),
        Some(CommandError::Empty)
    ));
    assert!(shell.calls().is_empty());
}

#[tokio::test]
async fn test_exec_runner_failure_exits_failure() {
    let code = exec::run(&app(false), &args(&["ls"]), &BrokenShell)
        .await
        .expect("exec");
    assert_exit(code, ExitCode::FAILURE);
}

#[tokio::test]
async fn test_report_for_broken_shell_is_failed_with_message() {
    let report = command_exec::execute(&BrokenShell, "ls").await.expect("report");
    assert_eq!(report.state, CommandState::Failed);
    assert!(!report.result.success);
    assert!(
        report
            .result
            .message
            .as_deref()
            .unwrap()
            .contains("failed to run sh")
    );
}

#[test]
fn test_exit_code_mapping() {
    assert_exit(exec::exit_code(CommandState::Succeeded), ExitCode::SUCCESS);
    assert_exit(exec::exit_code(CommandState::Rejected), ExitCode::from(2));
    assert_exit(exec::exit_code(CommandState::TimedOut), ExitCode::FAILURE);
    assert_exit(exec::exit_code(CommandState::Failed), ExitCode::FAILURE);
}
