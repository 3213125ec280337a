//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is built once from the global flags. It owns the output
//! context and the config store, and constructs the infrastructure adapters
//! each command needs from the loaded configuration.

use anyhow::Result;
use indicatif::ProgressBar;

use crate::application::services::config_service;
use crate::domain::config::DockyardConfig;
use crate::infra::cache::SqliteAppCache;
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::completion::HttpCompletionClient;
use crate::infra::config::YamlConfigStore;
use crate::infra::container_cli::ContainerCli;
use crate::infra::package_cli::PackageCli;
use crate::infra::shell::ShellCommandRunner;
use crate::output::progress::spinner_for;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `DOCKYARD_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Where settings are read from and written to.
    pub config_store: YamlConfigStore,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `DOCKYARD_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("DOCKYARD_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store: YamlConfigStore,
            non_interactive,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter writing to the terminal.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// A spinner for a long operation; hidden in JSON mode.
    #[must_use]
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.is_json() {
            ProgressBar::hidden()
        } else {
            spinner_for(&self.output, msg)
        }
    }

    /// Load the current configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read.
    pub fn config(&self) -> Result<DockyardConfig> {
        config_service::load_config(&self.config_store)
    }

    /// The host shell behind `exec` and `ask --run`.
    #[must_use]
    pub fn shell(&self) -> ShellCommandRunner<TokioCommandRunner> {
        ShellCommandRunner::new(TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT))
    }

    /// The configured package manager CLI.
    #[must_use]
    pub fn package_manager(&self, config: &DockyardConfig) -> PackageCli<TokioCommandRunner> {
        PackageCli::new(
            TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
            &config.tools.package_manager,
        )
    }

    /// The configured container engine CLI.
    #[must_use]
    pub fn container_engine(&self, config: &DockyardConfig) -> ContainerCli<TokioCommandRunner> {
        ContainerCli::new(
            TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
            &config.tools.container_engine,
        )
    }

    /// The local app cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn app_cache(&self) -> Result<SqliteAppCache> {
        SqliteAppCache::new()
    }

    /// The completion API client, keyed from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is set.
    pub fn completion_client(&self, config: &DockyardConfig) -> Result<HttpCompletionClient> {
        HttpCompletionClient::from_env(&config.assistant)
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `DOCKYARD_YES` env),
    /// returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
