//! Application service: package-manager use-cases backed by the app cache.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! App names are validated here and passed on as discrete arguments.

use std::process::Output;

use anyhow::Result;
use dockyard_common::{AppRecord, ExecutionResult};

use crate::application::ports::{AppCache, PackageManager, ProgressReporter};
use crate::domain::command::select_output;
use crate::domain::package::{parse_list_output, validate_app_name};

/// Refresh the cache from `<pm> list` and return the cached installed rows.
///
/// A failing package manager is not an error: the user gets a warning and an
/// empty list.
///
/// # Errors
///
/// Returns an error if the cache cannot be read or written.
pub async fn sync_installed(
    pm: &impl PackageManager,
    cache: &impl AppCache,
    reporter: &impl ProgressReporter,
) -> Result<Vec<AppRecord>> {
    let output = match pm.list().await {
        Ok(o) if o.status.success() => o,
        Ok(o) => {
            let stderr = String::from_utf8_lossy(&o.stderr);
            tracing::warn!(stderr = %stderr.trim(), "package list exited non-zero");
            reporter.warn("Could not list installed apps; showing none.");
            return Ok(Vec::new());
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "package list failed");
            reporter.warn("Could not list installed apps; showing none.");
            return Ok(Vec::new());
        }
    };

    let listed = parse_list_output(&String::from_utf8_lossy(&output.stdout));
    tracing::debug!(count = listed.len(), "syncing app cache");
    cache.upsert_installed(&listed).await?;
    cache.installed().await
}

/// Installed rows from the cache, without calling the package manager.
///
/// # Errors
///
/// Returns an error if the cache cannot be read.
pub async fn cached_installed(cache: &impl AppCache) -> Result<Vec<AppRecord>> {
    cache.installed().await
}

/// Raw `<pm> search <query>` output.
///
/// # Errors
///
/// Returns an error if the package manager cannot be run.
pub async fn search(pm: &impl PackageManager, query: &str) -> Result<ExecutionResult> {
    let output = pm.search(query.trim()).await?;
    Ok(to_result(&output))
}

/// Install `name` and mark it installed in the cache on success.
///
/// # Errors
///
/// Returns an error if the name is invalid or the cache cannot be written.
pub async fn install(
    pm: &impl PackageManager,
    cache: &impl AppCache,
    name: &str,
) -> Result<ExecutionResult> {
    validate_app_name(name)?;
    let result = absorb(pm.install(name).await);
    if result.success {
        cache.set_installed(name, true).await?;
    }
    Ok(result)
}

/// Uninstall `name` and mark it not installed in the cache on success.
///
/// # Errors
///
/// Returns an error if the name is invalid or the cache cannot be written.
pub async fn uninstall(
    pm: &impl PackageManager,
    cache: &impl AppCache,
    name: &str,
) -> Result<ExecutionResult> {
    validate_app_name(name)?;
    let result = absorb(pm.uninstall(name).await);
    if result.success {
        cache.set_installed(name, false).await?;
    }
    Ok(result)
}

/// Update `name`. The cache is left alone.
///
/// # Errors
///
/// Returns an error if the name is invalid.
pub async fn update(pm: &impl PackageManager, name: &str) -> Result<ExecutionResult> {
    validate_app_name(name)?;
    Ok(absorb(pm.update(name).await))
}

fn absorb(output: Result<Output>) -> ExecutionResult {
    match output {
        Ok(o) => to_result(&o),
        Err(e) => ExecutionResult::failure(format!("{e:#}")),
    }
}

fn to_result(output: &Output) -> ExecutionResult {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() {
        ExecutionResult::ok(select_output(&stdout, &stderr).trim_end())
    } else {
        let detail = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };
        ExecutionResult::failure(detail)
    }
}
