//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Command errors ────────────────────────────────────────────────────────────

/// Errors raised before a free-form command reaches the runner.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Nothing to run: the command is empty.")]
    Empty,
}

// ── Execution errors ──────────────────────────────────────────────────────────

/// Failures of the process runner itself. A non-zero exit status is not one
/// of them.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{program} timed out after {secs}s")]
    TimedOut { program: String, secs: u64 },

    #[error("{program} produced more than {limit} bytes of output (buffer exceeded)")]
    OutputLimitExceeded { program: String, limit: usize },
}

// ── Catalog errors ────────────────────────────────────────────────────────────

/// Errors related to package and container identifiers.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(
        "Invalid app name '{0}': use letters, digits, '.', '_', '+', '-' (optionally 'bucket/app')"
    )]
    InvalidAppName(String),

    #[error("Invalid container id '{0}': use letters, digits, '.', '_' or '-'")]
    InvalidContainerId(String),

    #[error("Container engine did not become ready after {attempts} checks.")]
    DaemonNotReady { attempts: u32 },

    #[error("Could not launch the container engine: {0}")]
    EngineLaunchFailed(String),
}

// ── Assistant errors ──────────────────────────────────────────────────────────

/// Errors related to the remote completion API and its suggestions.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("No API key configured. Set DOCKYARD_API_KEY.")]
    MissingApiKey,

    #[error("completion API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("completion response has no message content")]
    EmptyResponse,

    #[error("Suggestion {index} does not exist ({available} available).")]
    NoSuchSuggestion { index: usize, available: usize },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
