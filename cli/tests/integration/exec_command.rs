//! Integration tests for `dockyard exec`.
//!
//! Only harmless commands are run; dangerous ones must be refused before a
//! shell is ever started.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn dockyard() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dockyard"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_exec_dangerous_command_is_refused() {
    dockyard()
        .args(["exec", "sudo", "ls"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "potentially dangerous command detected, execution blocked.",
        ));
}

#[test]
fn test_exec_overlong_command_is_refused() {
    let long = "a".repeat(201);
    dockyard()
        .args(["exec", &long])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("command too long"));
}

#[test]
fn test_exec_rejection_json_reports_state() {
    let output = dockyard()
        .args(["--json", "exec", "rm", "-rf", "/tmp/dockyard-never"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["state"], "rejected");
    assert_eq!(value["result"]["success"], false);
    assert_eq!(value["command"], "rm -rf /tmp/dockyard-never");
}

#[test]
fn test_exec_without_command_fails() {
    dockyard()
        .arg("exec")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Nothing to run"));
}

#[cfg(unix)]
#[test]
fn test_exec_echo_prints_output() {
    dockyard()
        .args(["exec", "echo", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hi"));
}

#[cfg(unix)]
#[test]
fn test_exec_json_success_report() {
    let output = dockyard()
        .args(["exec", "--json", "echo", "hello"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["state"], "succeeded");
    assert_eq!(
        value["result"]["output"].as_str().map(str::trim),
        Some("hello")
    );
}

#[cfg(unix)]
#[test]
fn test_exec_silent_failure_still_reports_execution() {
    dockyard()
        .args(["exec", "exit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("command executed"));
}
