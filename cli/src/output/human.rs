//! Human-readable terminal renderer.

use std::path::Path;

use anyhow::Result;
use dockyard_common::{
    AppRecord, CommandState, ContainerSummary, DaemonStatus, ExecutionReport, ExecutionResult,
    StatusOutput, SuggestionsOutput,
};
use owo_colors::OwoColorize as _;

use crate::domain::config::DockyardConfig;
use crate::domain::package::CatalogEntry;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) -> Result<()> {
        println!("dockyard {version}");
        Ok(())
    }

    /// Render one free-form command's outcome.
    ///
    /// Command output goes to stdout verbatim; refusals and failures go to
    /// stderr.
    pub fn render_report(&self, report: &ExecutionReport) -> Result<()> {
        match report.state {
            CommandState::Succeeded => self.render_result(&report.result),
            CommandState::Rejected => {
                self.ctx.error(&format!(
                    "{} ({})",
                    report.result.message.as_deref().unwrap_or_default(),
                    report.command
                ));
                Ok(())
            }
            _ => {
                self.ctx.error(&format!(
                    "{}: {}",
                    state_display(report.state),
                    report.result.message.as_deref().unwrap_or_default()
                ));
                Ok(())
            }
        }
    }

    /// Render a `{ success, output, message }` result.
    pub fn render_result(&self, result: &ExecutionResult) -> Result<()> {
        if !result.success {
            self.ctx
                .error(result.message.as_deref().unwrap_or("operation failed"));
            return Ok(());
        }
        if let Some(output) = &result.output {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
        }
        if let Some(notice) = &result.message {
            self.ctx.warn(notice);
        }
        Ok(())
    }

    /// Render installed apps.
    pub fn render_apps(&self, apps: &[&AppRecord]) -> Result<()> {
        if apps.is_empty() {
            if !self.ctx.quiet {
                println!("No installed apps found.");
            }
            return Ok(());
        }
        for app in apps {
            println!("  {}", format_app_line(app));
        }
        Ok(())
    }

    /// Render the curated catalog.
    pub fn render_catalog(&self, entries: &[&CatalogEntry]) -> Result<()> {
        if entries.is_empty() {
            if !self.ctx.quiet {
                println!("No apps match.");
            }
            return Ok(());
        }
        for entry in entries {
            println!(
                "  {:<18} {}  {}",
                entry.name.style(self.ctx.styles.bold),
                entry.description,
                format!("[{}]", entry.bucket).style(self.ctx.styles.dim)
            );
        }
        if !self.ctx.quiet {
            println!("\nInstall one: dockyard apps install <name>");
        }
        Ok(())
    }

    /// Render containers as a table.
    pub fn render_containers(&self, containers: &[ContainerSummary]) -> Result<()> {
        if containers.is_empty() {
            if !self.ctx.quiet {
                println!("No containers.");
            }
            return Ok(());
        }
        println!(
            "  {}",
            format!(
                "{:<14} {:<24} {:<20} {:<10} {}",
                "ID", "IMAGE", "NAMES", "STATE", "STATUS"
            )
            .style(self.ctx.styles.dim)
        );
        for c in containers {
            println!("  {}", format_container_line(c));
        }
        Ok(())
    }

    /// Render the daemon probe.
    pub fn render_daemon(&self, status: &DaemonStatus) -> Result<()> {
        if status.running {
            self.ctx.success(&status.message);
        } else {
            self.ctx.warn(&status.message);
        }
        Ok(())
    }

    /// Render the overview.
    pub fn render_status(&self, status: &StatusOutput) -> Result<()> {
        self.ctx
            .kv("Installed apps:", &status.installed_apps.to_string());
        self.ctx.kv(
            "Container engine:",
            if status.engine_installed {
                "installed"
            } else {
                "not installed"
            },
        );
        if let Some(daemon) = &status.daemon {
            self.ctx.kv("Daemon:", daemon_display(daemon));
        } else if !status.engine_installed {
            self.ctx.info("Install one: dockyard apps install docker");
        }
        Ok(())
    }

    /// Render numbered assistant suggestions.
    pub fn render_suggestions(&self, output: &SuggestionsOutput) -> Result<()> {
        if output.suggestions.is_empty() {
            self.ctx.warn("No usable commands in the reply.");
            return Ok(());
        }
        for (i, cmd) in output.suggestions.iter().enumerate() {
            println!("  {}. {}", i + 1, cmd.style(self.ctx.styles.command));
        }
        if !self.ctx.quiet {
            println!("\nRun one: dockyard ask --run <n> \"{}\"", output.question);
        }
        Ok(())
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &DockyardConfig, path: &Path) -> Result<()> {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for (key, value) in config_rows(config) {
            println!("  {:<26} {value}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["DOCKYARD_CONFIG", "DOCKYARD_DB", "DOCKYARD_LOG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!(
            "    {:<18} {}",
            "DOCKYARD_API_KEY:",
            if std::env::var("DOCKYARD_API_KEY").is_ok() {
                "(set)"
            } else {
                "(not set)"
            }
        );
        println!();
        Ok(())
    }
}

// ── Display helpers (used by tests and output layer) ─────────────────────────

#[must_use]
pub fn state_display(state: CommandState) -> &'static str {
    match state {
        CommandState::Proposed => "proposed",
        CommandState::Validated => "validated",
        CommandState::Running => "running",
        CommandState::Succeeded => "succeeded",
        CommandState::Failed => "failed",
        CommandState::Rejected => "rejected",
        CommandState::TimedOut => "timed out",
    }
}

#[must_use]
pub fn daemon_display(status: &DaemonStatus) -> &'static str {
    if status.running {
        "running"
    } else {
        "not running"
    }
}

#[must_use]
pub fn format_app_line(app: &AppRecord) -> String {
    let version = app.version.as_deref().unwrap_or("-");
    let bucket = app.bucket.as_deref().unwrap_or("-");
    format!("{:<20} {version:<16} {bucket}", app.name)
}

#[must_use]
pub fn format_container_line(c: &ContainerSummary) -> String {
    let id: String = c.id.chars().take(12).collect();
    let line = format!(
        "{id:<14} {:<24} {:<20} {:<10} {}",
        c.image, c.names, c.state, c.status
    );
    if c.ports.is_empty() {
        line
    } else {
        format!("{line}  {}", c.ports)
    }
}

/// Every setting as `(key, value)`, in `VALID_CONFIG_KEYS` order.
#[must_use]
pub fn config_rows(config: &DockyardConfig) -> Vec<(&'static str, String)> {
    vec![
        ("desktop.auto_start", config.desktop.auto_start.to_string()),
        (
            "desktop.start_minimized",
            config.desktop.start_minimized.to_string(),
        ),
        (
            "desktop.close_to_tray",
            config.desktop.close_to_tray.to_string(),
        ),
        ("engine.disk_gb", config.engine.disk_gb.to_string()),
        ("engine.memory_gb", config.engine.memory_gb.to_string()),
        ("engine.cpus", config.engine.cpus.to_string()),
        (
            "engine.registry_mirror",
            if config.engine.registry_mirror.is_empty() {
                "(none)".to_string()
            } else {
                config.engine.registry_mirror.clone()
            },
        ),
        ("engine.experimental", config.engine.experimental.to_string()),
        ("engine.buildkit", config.engine.buildkit.to_string()),
        ("assistant.endpoint", config.assistant.endpoint.clone()),
        ("assistant.model", config.assistant.model.clone()),
        ("tools.package_manager", config.tools.package_manager.clone()),
        (
            "tools.container_engine",
            config.tools.container_engine.clone(),
        ),
    ]
}
