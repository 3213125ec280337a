//! Integration tests for `dockyard config` command.
//!
//! All filesystem-touching tests set `DOCKYARD_CONFIG` to a temp path so they
//! never read or write `~/.dockyard/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dockyard() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dockyard"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

// ---------------------------------------------------------------------------
// Subcommand registration
// ---------------------------------------------------------------------------

#[test]
fn test_config_help_shows_subcommands() {
    dockyard()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("reset-engine"));
}

// ---------------------------------------------------------------------------
// `dockyard config show`
// ---------------------------------------------------------------------------

#[test]
fn test_config_show_no_config_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    dockyard()
        .args(["config", "show"])
        .env("DOCKYARD_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("tools.package_manager:"))
        .stdout(predicate::str::contains("scoop"))
        .stdout(predicate::str::contains("DOCKYARD_CONFIG:"));
}

#[test]
fn test_config_show_json_has_path_and_config() {
    let (_dir, path) = temp_config_path();
    let output = dockyard()
        .args(["config", "show", "--json"])
        .env("DOCKYARD_CONFIG", &path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["path"], path.as_str());
    assert_eq!(value["config"]["engine"]["cpus"], 2);
}

// ---------------------------------------------------------------------------
// `dockyard config set`
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_writes_file() {
    let (_dir, path) = temp_config_path();
    dockyard()
        .args(["config", "set", "engine.memory_gb", "8"])
        .env("DOCKYARD_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set engine.memory_gb = 8"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("memory_gb: 8"), "{content}");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    dockyard()
        .args(["config", "set", "engine.turbo", "true"])
        .env("DOCKYARD_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting: engine.turbo"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_value_json_error() {
    let (_dir, path) = temp_config_path();
    let output = dockyard()
        .args(["config", "set", "engine.cpus", "500", "--json"])
        .env("DOCKYARD_CONFIG", &path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["code"], "invalid_config");
}

#[test]
fn test_config_reset_engine_keeps_other_sections() {
    let (_dir, path) = temp_config_path();
    std::fs::write(
        &path,
        "engine:\n  memory_gb: 16\nassistant:\n  model: local-model\n",
    )
    .unwrap();
    dockyard()
        .args(["config", "reset-engine", "--yes"])
        .env("DOCKYARD_CONFIG", &path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("model: local-model"), "{content}");
    assert!(!content.contains("memory_gb: 16"), "{content}");
}
