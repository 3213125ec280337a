//! Application service: container-engine use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use dockyard_common::{ContainerSummary, DaemonStatus, ExecutionResult};

use crate::application::ports::{ContainerEngine, ProgressReporter};
use crate::domain::command::select_output;
use crate::domain::container::{
    is_daemon_unreachable, parse_ps_output, parse_quiet_ids, validate_container_id,
};
use crate::domain::error::CatalogError;

/// List containers. An unreachable daemon or a missing engine binary is an
/// empty list.
///
/// # Errors
///
/// Returns an error if the engine runs but reports some other failure.
pub async fn list(engine: &impl ContainerEngine, all: bool) -> Result<Vec<ContainerSummary>> {
    let output = match engine.ps(all).await {
        Ok(o) => o,
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "container engine unavailable");
            return Ok(Vec::new());
        }
    };
    if output.status.success() {
        return Ok(parse_ps_output(&String::from_utf8_lossy(&output.stdout)));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if is_daemon_unreachable(&stderr) {
        tracing::debug!("container daemon not reachable");
        return Ok(Vec::new());
    }
    anyhow::bail!("container engine ps failed: {}", stderr.trim())
}

/// Start a container by id or name.
///
/// # Errors
///
/// Returns an error if the id is not a valid container reference.
pub async fn start(engine: &impl ContainerEngine, id: &str) -> Result<ExecutionResult> {
    validate_container_id(id)?;
    Ok(absorb(engine.start(id).await))
}

/// Stop a container by id or name.
///
/// # Errors
///
/// Returns an error if the id is not a valid container reference.
pub async fn stop(engine: &impl ContainerEngine, id: &str) -> Result<ExecutionResult> {
    validate_container_id(id)?;
    Ok(absorb(engine.stop(&[id]).await))
}

/// Remove a container by id or name.
///
/// # Errors
///
/// Returns an error if the id is not a valid container reference.
pub async fn remove(engine: &impl ContainerEngine, id: &str) -> Result<ExecutionResult> {
    validate_container_id(id)?;
    Ok(absorb(engine.remove(id).await))
}

/// Stop every running container in one engine call.
pub async fn stop_all(engine: &impl ContainerEngine) -> ExecutionResult {
    let output = match engine.ps_ids().await {
        Ok(o) if o.status.success() => o,
        other => return absorb(other),
    };
    let ids = parse_quiet_ids(&String::from_utf8_lossy(&output.stdout));
    if ids.is_empty() {
        return ExecutionResult::ok("no running containers");
    }
    tracing::info!(count = ids.len(), "stopping all containers");
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    match engine.stop(&refs).await {
        Ok(o) if o.status.success() => {
            ExecutionResult::ok(format!("stopped {} container(s)", ids.len()))
        }
        other => absorb(other),
    }
}

/// Probe the daemon once.
pub async fn daemon_status(engine: &impl ContainerEngine) -> DaemonStatus {
    match engine.info().await {
        Ok(o) if o.status.success() => DaemonStatus {
            running: true,
            message: "container engine is running".to_string(),
        },
        Ok(o) => {
            let stderr = String::from_utf8_lossy(&o.stderr);
            tracing::debug!(stderr = %stderr.trim(), "daemon probe failed");
            DaemonStatus {
                running: false,
                message: "container engine is not running".to_string(),
            }
        }
        Err(e) => DaemonStatus {
            running: false,
            message: format!("container engine is not running: {e:#}"),
        },
    }
}

/// Poll the daemon until it answers, at most `attempts` probes spaced by
/// `interval`.
///
/// # Errors
///
/// Returns [`CatalogError::DaemonNotReady`] if every probe fails.
pub async fn wait_until_ready(
    engine: &impl ContainerEngine,
    reporter: &impl ProgressReporter,
    attempts: u32,
    interval: Duration,
) -> Result<DaemonStatus> {
    for attempt in 1..=attempts {
        reporter.step(&format!(
            "Waiting for container engine ({attempt}/{attempts})..."
        ));
        let status = daemon_status(engine).await;
        if status.running {
            reporter.success("Container engine is ready");
            return Ok(status);
        }
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }
    Err(CatalogError::DaemonNotReady { attempts }.into())
}

/// Stop every running container, then end the engine backend. Containers
/// that cannot be listed or stopped do not prevent the shutdown.
pub async fn engine_stop(engine: &impl ContainerEngine) -> ExecutionResult {
    let containers = stop_all(engine).await;
    if !containers.success {
        tracing::debug!(message = ?containers.message, "containers not stopped before shutdown");
    }
    match engine.shutdown().await {
        Ok(o) if o.status.success() => {
            tracing::info!("container engine stopped");
            ExecutionResult::ok("container engine stopped")
        }
        Ok(_) => ExecutionResult::ok("container engine was not running"),
        Err(e) => ExecutionResult::failure(format!("{e:#}")),
    }
}

/// End the engine backend, launch it again and wait until the daemon
/// answers. `pause` separates a successful shutdown from the launch.
///
/// # Errors
///
/// Returns [`CatalogError::EngineLaunchFailed`] if no launcher succeeds and
/// [`CatalogError::DaemonNotReady`] if the daemon never answers.
pub async fn engine_restart(
    engine: &impl ContainerEngine,
    reporter: &impl ProgressReporter,
    pause: Duration,
    attempts: u32,
    interval: Duration,
) -> Result<DaemonStatus> {
    reporter.step("Stopping container engine...");
    let stopped = matches!(engine.shutdown().await, Ok(ref o) if o.status.success());
    if stopped {
        tokio::time::sleep(pause).await;
    }

    reporter.step("Launching container engine...");
    match engine.launch().await {
        Ok(o) if o.status.success() => {}
        Ok(o) => {
            let stderr = String::from_utf8_lossy(&o.stderr);
            return Err(CatalogError::EngineLaunchFailed(stderr.trim().to_string()).into());
        }
        Err(e) => return Err(CatalogError::EngineLaunchFailed(format!("{e:#}")).into()),
    }
    tracing::info!("container engine launched");

    wait_until_ready(engine, reporter, attempts, interval).await
}

fn absorb(output: Result<Output>) -> ExecutionResult {
    match output {
        Ok(o) => {
            let stdout = String::from_utf8_lossy(&o.stdout);
            let stderr = String::from_utf8_lossy(&o.stderr);
            if o.status.success() {
                ExecutionResult::ok(select_output(&stdout, &stderr).trim_end())
            } else {
                ExecutionResult::failure(stderr.trim())
            }
        }
        Err(e) => ExecutionResult::failure(format!("{e:#}")),
    }
}
