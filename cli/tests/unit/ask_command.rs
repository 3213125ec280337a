//! Unit tests for `dockyard ask`: listing and running suggestions.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::process::ExitCode;

use dockyard_cli::commands::ask::{self, AskArgs};
use dockyard_cli::domain::error::AssistantError;

use crate::helpers::{app, assert_exit};
use crate::mocks::{CannedCompletion, RecordingShell};

const REPLY: &str = "1. docker ps -a\n2. sudo docker ps\n3. docker images\n";

fn args(run: Option<usize>) -> AskArgs {
    AskArgs {
        question: vec!["list".to_string(), "containers".to_string()],
        run,
    }
}

#[tokio::test]
async fn test_ask_without_run_lists_and_executes_nothing() {
    let shell = RecordingShell::replying("");
    let code = ask::run(&app(true), &args(None), &CannedCompletion(REPLY), &shell)
        .await
        .expect("ask");
    assert_exit(code, ExitCode::SUCCESS);
    assert!(shell.calls().is_empty());
}

#[tokio::test]
async fn test_ask_run_executes_the_picked_suggestion() {
    let shell = RecordingShell::replying("CONTAINER ID\n");
    let code = ask::run(&app(false), &args(Some(1)), &CannedCompletion(REPLY), &shell)
        .await
        .expect("ask");
    assert_exit(code, ExitCode::SUCCESS);
    assert_eq!(shell.calls(), vec!["docker ps -a"]);
}

#[tokio::test]
async fn test_ask_run_still_validates_suggestions() {
    let shell = RecordingShell::replying("");
    let code = ask::run(&app(false), &args(Some(2)), &CannedCompletion(REPLY), &shell)
        .await
        .expect("ask");
    assert_exit(code, ExitCode::from(2));
    assert!(shell.calls().is_empty());
}

#[tokio::test]
async fn test_ask_run_out_of_range_is_an_error() {
    let shell = RecordingShell::replying("");
    let err = ask::run(&app(false), &args(Some(9)), &CannedCompletion(REPLY), &shell)
        .await
        .err()
        .expect("index 9 should fail");
    assert!(matches!(
        err.downcast_ref::<AssistantError>(),
        Some(AssistantError::NoSuchSuggestion { index: 9, available: 3 })
    ));
}
