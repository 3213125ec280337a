use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Uniform result of one command or catalog operation.
///
/// `output` is only present on success. `message` carries the failure reason,
/// or a notice on success (e.g. truncated output).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExecutionResult {
    #[must_use]
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: Some(output.into()),
            message: None,
        }
    }

    #[must_use]
    pub fn ok_with_notice(output: impl Into<String>, notice: impl Into<String>) -> Self {
        Self {
            success: true,
            output: Some(output.into()),
            message: Some(notice.into()),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            message: Some(message.into()),
        }
    }
}

/// Lifecycle of a single candidate command.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandState {
    Proposed,
    Validated,
    Running,
    Succeeded,
    Failed,
    Rejected,
    TimedOut,
}

impl CommandState {
    /// Terminal states never transition again.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::Rejected | Self::TimedOut
        )
    }

    /// Forward-only transition graph.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Proposed, Self::Validated | Self::Rejected)
                | (Self::Validated, Self::Running)
                | (Self::Running, Self::Succeeded | Self::Failed | Self::TimedOut)
        )
    }
}

/// What happened to one command on its way through validation and execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub command: String,
    pub state: CommandState,
    pub result: ExecutionResult,
}

/// A row of the installed-app cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    pub installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// One container as reported by the engine's `ps`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContainerSummary {
    pub id: String,
    pub image: String,
    pub names: String,
    pub status: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ports: String,
}

/// Container daemon reachability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaemonStatus {
    pub running: bool,
    pub message: String,
}

/// `dockyard status` overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    pub installed_apps: usize,
    pub engine_installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daemon: Option<DaemonStatus>,
}

/// Assistant reply after parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsOutput {
    pub question: String,
    pub suggestions: Vec<String>,
}
