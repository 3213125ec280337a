//! Shared mock infrastructure for unit tests.
//!
//! Provides canned port implementations so each test file doesn't have to
//! re-define the same boilerplate.

#![allow(clippy::expect_used, dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::Output;
use std::sync::Mutex;

use anyhow::Result;
use dockyard_cli::application::ports::{
    AppCache, CompletionClient, ConfigStore, ContainerEngine, PackageManager, ShellRunner,
};
use dockyard_cli::domain::config::DockyardConfig;
use dockyard_cli::domain::package::ListedApp;
use dockyard_common::{AppRecord, ExecutionResult};

use crate::helpers::{err_output, ok_output};

fn unexpected<T>() -> Result<T> {
    anyhow::bail!("not expected in this test")
}

// ── Shell ────────────────────────────────────────────────────────────────────

/// Records every command and answers with a fixed result.
pub struct RecordingShell {
    pub reply: ExecutionResult,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingShell {
    pub fn replying(output: &str) -> Self {
        Self {
            reply: ExecutionResult::ok(output),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }
}

impl ShellRunner for RecordingShell {
    async fn run_shell(&self, command: &str) -> Result<ExecutionResult> {
        self.calls.lock().expect("lock").push(command.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every run the way a runner does when the process cannot start.
pub struct BrokenShell;

impl ShellRunner for BrokenShell {
    async fn run_shell(&self, _command: &str) -> Result<ExecutionResult> {
        anyhow::bail!("failed to run sh: No such file or directory")
    }
}

// ── Package manager ──────────────────────────────────────────────────────────

/// Package manager whose `list` returns `listed` and whose mutations exit
/// with `mutation_code`.
pub struct StubPackageManager {
    pub listed: &'static str,
    pub mutation_code: i32,
    pub calls: Mutex<Vec<String>>,
}

impl StubPackageManager {
    pub fn new(listed: &'static str) -> Self {
        Self {
            listed,
            mutation_code: 0,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_mutations(mut self) -> Self {
        self.mutation_code = 1;
        self
    }

    fn record(&self, call: String) -> Output {
        self.calls.lock().expect("lock").push(call);
        if self.mutation_code == 0 {
            ok_output(b"done\n")
        } else {
            err_output(self.mutation_code, b"Couldn't find manifest\n")
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }
}

impl PackageManager for StubPackageManager {
    async fn list(&self) -> Result<Output> {
        Ok(ok_output(self.listed.as_bytes()))
    }

    async fn search(&self, query: &str) -> Result<Output> {
        Ok(self.record(format!("search {query}")))
    }

    async fn install(&self, name: &str) -> Result<Output> {
        Ok(self.record(format!("install {name}")))
    }

    async fn uninstall(&self, name: &str) -> Result<Output> {
        Ok(self.record(format!("uninstall {name}")))
    }

    async fn update(&self, name: &str) -> Result<Output> {
        Ok(self.record(format!("update {name}")))
    }
}

// ── Cache ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryCache {
    pub rows: Mutex<Vec<AppRecord>>,
}

impl MemoryCache {
    pub fn names(&self) -> Vec<String> {
        self.rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|r| r.installed)
            .map(|r| r.name.clone())
            .collect()
    }
}

fn record(name: &str) -> AppRecord {
    AppRecord {
        name: name.to_string(),
        version: None,
        description: None,
        bucket: None,
        installed: true,
        icon: None,
        updated_at: None,
    }
}

impl AppCache for MemoryCache {
    async fn upsert_installed(&self, apps: &[ListedApp]) -> Result<()> {
        let mut rows = self.rows.lock().expect("lock");
        for app in apps {
            rows.retain(|r| r.name != app.name);
            let mut row = record(&app.name);
            row.version = Some(app.version.clone());
            row.bucket = Some(app.bucket.clone());
            rows.push(row);
        }
        Ok(())
    }

    async fn set_installed(&self, name: &str, installed: bool) -> Result<()> {
        let mut rows = self.rows.lock().expect("lock");
        match rows.iter_mut().find(|r| r.name == name) {
            Some(row) => row.installed = installed,
            None => {
                let mut row = record(name);
                row.installed = installed;
                rows.push(row);
            }
        }
        Ok(())
    }

    async fn installed(&self) -> Result<Vec<AppRecord>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|r| r.installed)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

// ── Container engine ─────────────────────────────────────────────────────────

/// Engine with a fixed `ps` answer and a daemon that is up or down.
pub struct StubEngine {
    pub ps_stdout: &'static str,
    pub daemon_up: bool,
    pub launchable: bool,
    pub calls: Mutex<Vec<String>>,
}

impl StubEngine {
    pub fn running(ps_stdout: &'static str) -> Self {
        Self {
            ps_stdout,
            daemon_up: true,
            launchable: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn daemon_down() -> Self {
        Self {
            ps_stdout: "",
            daemon_up: false,
            launchable: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn down_output() -> Output {
        err_output(
            1,
            b"Cannot connect to the Docker daemon at unix:///var/run/docker.sock. Is the docker daemon running?\n",
        )
    }

    /// No backend installation to launch.
    pub fn not_installed(mut self) -> Self {
        self.launchable = false;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }
}

impl ContainerEngine for StubEngine {
    async fn ps(&self, _all: bool) -> Result<Output> {
        if self.daemon_up {
            Ok(ok_output(self.ps_stdout.as_bytes()))
        } else {
            Ok(Self::down_output())
        }
    }

    async fn ps_ids(&self) -> Result<Output> {
        Ok(ok_output(b"3f2a9c0d1e2f\n7b1c2d3e4f5a\n"))
    }

    async fn start(&self, id: &str) -> Result<Output> {
        self.calls.lock().expect("lock").push(format!("start {id}"));
        Ok(ok_output(format!("{id}\n").as_bytes()))
    }

    async fn stop(&self, ids: &[&str]) -> Result<Output> {
        self.calls
            .lock()
            .expect("lock")
            .push(format!("stop {}", ids.join(" ")));
        Ok(ok_output(b""))
    }

    async fn remove(&self, id: &str) -> Result<Output> {
        self.calls.lock().expect("lock").push(format!("rm {id}"));
        Ok(ok_output(format!("{id}\n").as_bytes()))
    }

    async fn info(&self) -> Result<Output> {
        if self.daemon_up {
            Ok(ok_output(b"Server Version: 24.0.7\n"))
        } else {
            Ok(Self::down_output())
        }
    }

    async fn shutdown(&self) -> Result<Output> {
        self.calls.lock().expect("lock").push("shutdown".to_string());
        Ok(ok_output(b""))
    }

    async fn launch(&self) -> Result<Output> {
        self.calls.lock().expect("lock").push("launch".to_string());
        if self.launchable {
            Ok(ok_output(b""))
        } else {
            anyhow::bail!("no container engine installation found")
        }
    }
}

// ── Completion client ────────────────────────────────────────────────────────

pub struct CannedCompletion(pub &'static str);

impl CompletionClient for CannedCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

pub struct UnreachableCompletion;

impl CompletionClient for UnreachableCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        unexpected()
    }
}

// ── Config store ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryConfigStore {
    pub saved: RefCell<Option<DockyardConfig>>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<DockyardConfig> {
        Ok(self.saved.borrow().clone().unwrap_or_default())
    }

    fn save(&self, config: &DockyardConfig) -> Result<()> {
        *self.saved.borrow_mut() = Some(config.clone());
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/tmp/dockyard-test/config.yaml"))
    }
}
