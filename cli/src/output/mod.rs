//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use dockyard_common::{
    AppRecord, ContainerSummary, DaemonStatus, ExecutionReport, ExecutionResult, StatusOutput,
    SuggestionsOutput,
};
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::domain::config::DockyardConfig;
use crate::domain::package::CatalogEntry;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠` to stderr. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Human or JSON rendering, picked once per invocation.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

macro_rules! dispatch {
    ($self:ident, $method:ident($($arg:expr),*)) => {
        match $self {
            Renderer::Human(r) => r.$method($($arg),*),
            Renderer::Json(r) => r.$method($($arg),*),
        }
    };
}

impl Renderer<'_> {
    /// Render the outcome of one free-form command.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_report(&self, report: &ExecutionReport) -> Result<()> {
        dispatch!(self, render_report(report))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_result(&self, result: &ExecutionResult) -> Result<()> {
        dispatch!(self, render_result(result))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_apps(&self, apps: &[&AppRecord]) -> Result<()> {
        dispatch!(self, render_apps(apps))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_catalog(&self, entries: &[&CatalogEntry]) -> Result<()> {
        dispatch!(self, render_catalog(entries))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_containers(&self, containers: &[ContainerSummary]) -> Result<()> {
        dispatch!(self, render_containers(containers))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_daemon(&self, status: &DaemonStatus) -> Result<()> {
        dispatch!(self, render_daemon(status))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(&self, status: &StatusOutput) -> Result<()> {
        dispatch!(self, render_status(status))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_suggestions(&self, output: &SuggestionsOutput) -> Result<()> {
        dispatch!(self, render_suggestions(output))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &DockyardConfig, path: &Path) -> Result<()> {
        dispatch!(self, render_config(config, path))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        dispatch!(self, render_version(version))
    }
}
