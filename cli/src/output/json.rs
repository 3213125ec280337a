//! JSON output.
//!
//! `JsonRenderer` prints one pretty-printed document per command on stdout.
//! `format_error` builds the error object every `--json` code path emits
//! when a command fails.

use std::path::Path;

use anyhow::{Context, Result};
use dockyard_common::{
    AppRecord, ContainerSummary, DaemonStatus, ExecutionReport, ExecutionResult, StatusOutput,
    SuggestionsOutput,
};
use serde::Serialize;

use crate::domain::config::DockyardConfig;
use crate::domain::error::{AssistantError, CatalogError, CommandError, ConfigError, ExecError};
use crate::domain::package::CatalogEntry;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable code for a failed command, from its typed cause.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<CommandError>().is_some() {
        "command_rejected"
    } else if err.downcast_ref::<ConfigError>().is_some() {
        "invalid_config"
    } else if err.downcast_ref::<AssistantError>().is_some() {
        "assistant"
    } else if err.downcast_ref::<CatalogError>().is_some() {
        "invalid_target"
    } else if err.downcast_ref::<ExecError>().is_some() {
        "exec"
    } else {
        "error"
    }
}

fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{text}");
    Ok(())
}

/// Renders command results as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn render_report(&self, report: &ExecutionReport) -> Result<()> {
        print(report)
    }

    pub fn render_result(&self, result: &ExecutionResult) -> Result<()> {
        print(result)
    }

    pub fn render_apps(&self, apps: &[&AppRecord]) -> Result<()> {
        print(apps)
    }

    pub fn render_catalog(&self, entries: &[&CatalogEntry]) -> Result<()> {
        print(entries)
    }

    pub fn render_containers(&self, containers: &[ContainerSummary]) -> Result<()> {
        print(containers)
    }

    pub fn render_daemon(&self, status: &DaemonStatus) -> Result<()> {
        print(status)
    }

    pub fn render_status(&self, status: &StatusOutput) -> Result<()> {
        print(status)
    }

    pub fn render_suggestions(&self, output: &SuggestionsOutput) -> Result<()> {
        print(output)
    }

    pub fn render_config(&self, config: &DockyardConfig, path: &Path) -> Result<()> {
        print(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    pub fn render_version(&self, version: &str) -> Result<()> {
        print(&serde_json::json!({ "version": version }))
    }
}
