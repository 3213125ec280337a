//! Container-engine output parsing and identifier validation.
//!
//! Pure functions only.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::Result;
use dockyard_common::ContainerSummary;
use regex::Regex;
use serde::Deserialize;

use crate::domain::error::CatalogError;

/// Timeout for the daemon reachability probe (`<engine> info`).
pub const DAEMON_PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Interval between readiness probes in `containers wait`.
pub const DAEMON_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Readiness probes before `containers wait` gives up (60 s in total).
pub const DAEMON_POLL_ATTEMPTS: u32 = 12;

/// Cached app names that mean "a container engine is installed".
pub const ENGINE_APP_NAMES: &[&str] = &["docker", "docker-desktop"];

/// Container ids and names: what `docker` itself accepts for references.
pub static CONTAINER_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,127}$").expect("valid regex")
});

/// Fragments of engine stderr meaning the daemon is not reachable.
const DAEMON_DOWN_MARKERS: &[&str] = &[
    "cannot connect to the docker daemon",
    "error during connect",
    "is the docker daemon running",
    "docker daemon is not running",
];

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PsLine {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    names: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    ports: String,
}

/// Parse `<engine> ps --format "{{json .}}"` output, one object per line.
/// Lines that are not JSON objects are skipped.
#[must_use]
pub fn parse_ps_output(stdout: &str) -> Vec<ContainerSummary> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str::<PsLine>(line).ok())
        .map(|p| ContainerSummary {
            id: p.id,
            image: p.image,
            names: p.names,
            status: p.status,
            state: p.state,
            ports: p.ports,
        })
        .collect()
}

/// Parse `<engine> ps -q` output into container ids.
#[must_use]
pub fn parse_quiet_ids(stdout: &str) -> Vec<String> {
    stdout
        .split_whitespace()
        .filter(|id| CONTAINER_ID_RE.is_match(id))
        .map(String::from)
        .collect()
}

/// Whether engine stderr says the daemon is down rather than reporting a
/// real failure.
#[must_use]
pub fn is_daemon_unreachable(stderr: &str) -> bool {
    let lower = stderr.to_ascii_lowercase();
    DAEMON_DOWN_MARKERS.iter().any(|m| lower.contains(m))
}

/// Validate a container reference before it is handed to the engine.
///
/// # Errors
///
/// Returns an error if the id contains anything but id/name characters.
pub fn validate_container_id(id: &str) -> Result<()> {
    if !CONTAINER_ID_RE.is_match(id) {
        return Err(CatalogError::InvalidContainerId(id.to_string()).into());
    }
    Ok(())
}

// ── Engine host process ──────────────────────────────────────────────────────

/// Pause between ending the engine backend and launching it again.
pub const ENGINE_RESTART_PAUSE: Duration = Duration::from_secs(2);

/// Default Docker Desktop install locations on Windows.
const WINDOWS_ENGINE_PATHS: &[&str] = &[
    r"C:\Program Files\Docker\Docker\Docker Desktop.exe",
    r"C:\Program Files (x86)\Docker\Docker\Docker Desktop.exe",
];

/// One process call that controls the engine's desktop backend. Arguments
/// are passed to the process as-is, never through a shell string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCall {
    pub program: String,
    pub args: Vec<String>,
    /// Skip the call unless this file exists.
    pub requires_path: Option<String>,
}

impl HostCall {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            requires_path: None,
        }
    }
}

/// Where the engine backend lives, which decides how it is stopped and
/// launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineHost {
    Windows,
    MacOs,
    Linux,
}

impl EngineHost {
    /// The host dockyard was built for.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Calls that end the backend, tried in order until one succeeds.
    #[must_use]
    pub fn shutdown_calls(self) -> Vec<HostCall> {
        match self {
            Self::Windows => vec![
                HostCall::new("taskkill", &["/F", "/IM", "Docker Desktop.exe"]),
                HostCall::new("taskkill", &["/F", "/IM", "com.docker.backend.exe"]),
            ],
            Self::MacOs => vec![HostCall::new("osascript", &["-e", "quit app \"Docker\""])],
            Self::Linux => vec![HostCall::new(
                "systemctl",
                &["--user", "stop", "docker-desktop"],
            )],
        }
    }

    /// Calls that launch the backend, tried in order until one succeeds.
    /// On Windows each known install path is a candidate; `local_app_data`
    /// adds the per-user location.
    #[must_use]
    pub fn launch_calls(self, local_app_data: Option<&str>) -> Vec<HostCall> {
        match self {
            Self::Windows => {
                let user_path =
                    local_app_data.map(|dir| format!(r"{dir}\Docker\Docker Desktop.exe"));
                WINDOWS_ENGINE_PATHS
                    .iter()
                    .map(ToString::to_string)
                    .chain(user_path)
                    .map(|path| HostCall {
                        program: "cmd".to_string(),
                        args: vec![
                            "/C".to_string(),
                            "start".to_string(),
                            String::new(),
                            path.clone(),
                        ],
                        requires_path: Some(path),
                    })
                    .collect()
            }
            Self::MacOs => vec![HostCall::new("open", &["-a", "Docker"])],
            Self::Linux => vec![HostCall::new(
                "systemctl",
                &["--user", "start", "docker-desktop"],
            )],
        }
    }
}
