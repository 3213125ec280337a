//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and shared types, never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use dockyard_common::{AppRecord, ExecutionResult};

use crate::domain::config::DockyardConfig;
use crate::domain::package::ListedApp;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned, exceeds `timeout`,
    /// or produces more output than the runner buffers. On timeout the child
    /// process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with extra environment variables and a timeout.
    async fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Shell Port ────────────────────────────────────────────────────────────────

/// Runs one command line in the host shell. Callers validate first.
#[allow(async_fn_in_trait)]
pub trait ShellRunner {
    /// Execute `command` and shape its output.
    ///
    /// A non-zero exit status is a successful run.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned, the run exceeds its
    /// timeout, or the output exceeds the buffer cap.
    async fn run_shell(&self, command: &str) -> Result<ExecutionResult>;
}

// ── External CLI Ports ────────────────────────────────────────────────────────

/// Fixed-template calls to the package manager. Names are passed as
/// discrete arguments, never through a shell.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    async fn list(&self) -> Result<Output>;
    async fn search(&self, query: &str) -> Result<Output>;
    async fn install(&self, name: &str) -> Result<Output>;
    async fn uninstall(&self, name: &str) -> Result<Output>;
    async fn update(&self, name: &str) -> Result<Output>;
}

/// Fixed-template calls to the container engine.
#[allow(async_fn_in_trait)]
pub trait ContainerEngine {
    /// `ps --format "{{json .}}"`, including stopped containers when `all`.
    async fn ps(&self, all: bool) -> Result<Output>;
    /// `ps -q`: ids of running containers.
    async fn ps_ids(&self) -> Result<Output>;
    async fn start(&self, id: &str) -> Result<Output>;
    async fn stop(&self, ids: &[&str]) -> Result<Output>;
    async fn remove(&self, id: &str) -> Result<Output>;
    /// Daemon probe, bounded by `DAEMON_PROBE_TIMEOUT`.
    async fn info(&self) -> Result<Output>;
    /// End the engine's desktop backend process. A non-zero status means
    /// nothing was running.
    async fn shutdown(&self) -> Result<Output>;
    /// Launch the engine's desktop backend without waiting for it to be ready.
    async fn launch(&self) -> Result<Output>;
}

// ── Completion Port ───────────────────────────────────────────────────────────

/// A remote text-completion service.
#[allow(async_fn_in_trait)]
pub trait CompletionClient {
    /// Send one user message and return the reply's content.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Persistence Ports ─────────────────────────────────────────────────────────

/// Local cache of installed-package metadata.
#[allow(async_fn_in_trait)]
pub trait AppCache {
    /// Insert or refresh listed apps and flag them installed.
    async fn upsert_installed(&self, apps: &[ListedApp]) -> Result<()>;
    /// Flag a single app installed or not, creating the row if needed.
    async fn set_installed(&self, name: &str, installed: bool) -> Result<()>;
    /// All rows currently flagged installed, ordered by name.
    async fn installed(&self) -> Result<Vec<AppRecord>>;
}

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when absent.
    fn load(&self) -> Result<DockyardConfig>;
    /// Persist the configuration.
    fn save(&self, config: &DockyardConfig) -> Result<()>;
    /// Where the configuration lives.
    fn path(&self) -> Result<std::path::PathBuf>;
}
