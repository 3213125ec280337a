//! Unit tests for `dockyard containers`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::process::ExitCode;

use dockyard_cli::commands::containers::{self, ContainersCommand};
use dockyard_cli::domain::error::CatalogError;

use crate::helpers::{app, assert_exit};
use crate::mocks::StubEngine;

const PS: &str = r#"{"ID":"3f2a9c0d1e2f","Image":"nginx","Names":"web","Status":"Up 2 hours","State":"running","Ports":"0.0.0.0:80->80/tcp"}"#;

#[tokio::test]
async fn test_list_succeeds_when_daemon_is_down() {
    let engine = StubEngine::daemon_down();
    let code = containers::run(&app(true), ContainersCommand::List { all: true }, &engine)
        .await
        .expect("list");
    assert_exit(code, ExitCode::SUCCESS);
}

#[tokio::test]
async fn test_list_renders_running_containers() {
    let engine = StubEngine::running(PS);
    let code = containers::run(&app(true), ContainersCommand::List { all: false }, &engine)
        .await
        .expect("list");
    assert_exit(code, ExitCode::SUCCESS);
}

#[tokio::test]
async fn test_start_and_remove_pass_id_through() {
    let engine = StubEngine::running(PS);
    let ctx = app(false);
    containers::run(
        &ctx,
        ContainersCommand::Start {
            id: "web".to_string(),
        },
        &engine,
    )
    .await
    .expect("start");
    containers::run(
        &ctx,
        ContainersCommand::Rm {
            id: "web".to_string(),
        },
        &engine,
    )
    .await
    .expect("rm");
    assert_eq!(engine.calls(), vec!["start web", "rm web"]);
}

#[tokio::test]
async fn test_invalid_id_is_rejected_before_engine() {
    let engine = StubEngine::running(PS);
    let err = containers::run(
        &app(false),
        ContainersCommand::Stop {
            id: "web && reboot".to_string(),
        },
        &engine,
    )
    .await
    .err()
    .expect("invalid id");
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::InvalidContainerId(_))
    ));
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn test_stop_all_stops_every_running_id_in_one_call() {
    let engine = StubEngine::running(PS);
    let code = containers::run(&app(false), ContainersCommand::StopAll, &engine)
        .await
        .expect("stop-all");
    assert_exit(code, ExitCode::SUCCESS);
    assert_eq!(engine.calls(), vec!["stop 3f2a9c0d1e2f 7b1c2d3e4f5a"]);
}

#[tokio::test]
async fn test_status_exit_code_follows_daemon() {
    let up = containers::run(&app(true), ContainersCommand::Status, &StubEngine::running(""))
        .await
        .expect("status");
    assert_exit(up, ExitCode::SUCCESS);

    let down = containers::run(&app(true), ContainersCommand::Status, &StubEngine::daemon_down())
        .await
        .expect("status");
    assert_exit(down, ExitCode::FAILURE);
}

#[tokio::test]
async fn test_wait_returns_at_once_when_daemon_is_up() {
    let code = containers::run(&app(true), ContainersCommand::Wait, &StubEngine::running(""))
        .await
        .expect("wait");
    assert_exit(code, ExitCode::SUCCESS);
}

#[tokio::test]
async fn test_engine_stop_stops_containers_then_backend() {
    let engine = StubEngine::running(PS);
    let code = containers::run(&app(false), ContainersCommand::EngineStop, &engine)
        .await
        .expect("engine-stop");
    assert_exit(code, ExitCode::SUCCESS);
    assert_eq!(
        engine.calls(),
        vec!["stop 3f2a9c0d1e2f 7b1c2d3e4f5a", "shutdown"]
    );
}

#[tokio::test]
async fn test_engine_restart_relaunches_and_waits() {
    let engine = StubEngine::running("");
    let code = containers::run(&app(true), ContainersCommand::EngineRestart, &engine)
        .await
        .expect("engine-restart");
    assert_exit(code, ExitCode::SUCCESS);
    assert_eq!(engine.calls(), vec!["shutdown", "launch"]);
}

#[tokio::test]
async fn test_engine_restart_without_installation_fails() {
    let engine = StubEngine::running("").not_installed();
    let err = containers::run(&app(true), ContainersCommand::EngineRestart, &engine)
        .await
        .err()
        .expect("launch failure");
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::EngineLaunchFailed(_))
    ));
}
