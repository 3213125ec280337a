//! Unit tests for the YAML config store and `dockyard config` handlers.
//!
//! IMPORTANT: tests that touch the real store mutate `DOCKYARD_CONFIG` and
//! are serialized with `serial_test`.

#![allow(clippy::expect_used, clippy::unwrap_used, unsafe_code)]

use std::process::ExitCode;

use dockyard_cli::application::ports::ConfigStore;
use dockyard_cli::commands::config::{self, ConfigCommand};
use dockyard_cli::domain::config::DockyardConfig;
use dockyard_cli::domain::error::ConfigError;
use dockyard_cli::infra::config::{CONFIG_PATH_ENV, YamlConfigStore};
use serial_test::serial;
use tempfile::TempDir;

use crate::helpers::{app, assert_exit};
use crate::mocks::MemoryConfigStore;

fn temp_store() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("config.yaml");
    // SAFETY: every test using this helper is #[serial].
    unsafe { std::env::set_var(CONFIG_PATH_ENV, &path) };
    (dir, path)
}

#[test]
#[serial]
fn test_missing_file_loads_defaults() {
    let (_dir, _path) = temp_store();
    let config = YamlConfigStore.load().expect("load");
    assert_eq!(config, DockyardConfig::default());
}

#[test]
#[serial]
fn test_save_then_load_keeps_values_and_creates_parent() {
    let (_dir, path) = temp_store();
    let mut config = DockyardConfig::default();
    config.engine.memory_gb = 8;
    config.tools.container_engine = "podman".to_string();
    YamlConfigStore.save(&config).expect("save");

    assert!(path.exists());
    assert_eq!(YamlConfigStore.load().expect("load"), config);
}

#[cfg(unix)]
#[test]
#[serial]
fn test_saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = temp_store();
    YamlConfigStore
        .save(&DockyardConfig::default())
        .expect("save");
    let mode = std::fs::metadata(&path).expect("meta").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
#[serial]
fn test_empty_file_loads_defaults() {
    let (_dir, path) = temp_store();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "\n").unwrap();
    assert_eq!(
        YamlConfigStore.load().expect("load"),
        DockyardConfig::default()
    );
}

#[test]
#[serial]
fn test_corrupt_file_is_an_error() {
    let (_dir, path) = temp_store();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "engine: [not, a, map").unwrap();
    assert!(YamlConfigStore.load().is_err());
}

#[test]
fn test_config_set_persists_value() {
    let store = MemoryConfigStore::default();
    let cmd = ConfigCommand::Set {
        key: "engine.cpus".to_string(),
        value: "4".to_string(),
    };
    let code = config::run(&app(false), cmd, &store).expect("set");
    assert_exit(code, ExitCode::SUCCESS);
    assert_eq!(store.load().expect("load").engine.cpus, 4);
}

#[test]
fn test_config_set_invalid_value_saves_nothing() {
    let store = MemoryConfigStore::default();
    let cmd = ConfigCommand::Set {
        key: "engine.cpus".to_string(),
        value: "0".to_string(),
    };
    let err = config::run(&app(false), cmd, &store)
        .err()
        .expect("cpus 0 should fail");
    assert!(err.downcast_ref::<ConfigError>().is_some());
    assert!(store.saved.borrow().is_none());
}

#[test]
fn test_reset_engine_restores_defaults_only() {
    let store = MemoryConfigStore::default();
    let mut config = DockyardConfig::default();
    config.engine.memory_gb = 16;
    config.assistant.model = "custom".to_string();
    store.save(&config).expect("save");

    let code = config::run(&app(true), ConfigCommand::ResetEngine, &store).expect("reset");
    assert_exit(code, ExitCode::SUCCESS);

    let after = store.load().expect("load");
    assert_eq!(after.engine, DockyardConfig::default().engine);
    assert_eq!(after.assistant.model, "custom");
}
