//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod assistant;
pub mod command;
pub mod config;
pub mod container;
pub mod error;
pub mod package;
pub mod shell;
pub mod suggestion;
pub mod view;

pub use command::{Rejection, ValidationVerdict, validate_command};
pub use config::{DockyardConfig, apply_config_value, validate_config_key, validate_config_value};
pub use error::{AssistantError, CatalogError, CommandError, ConfigError, ExecError};
pub use suggestion::parse_suggestions;
pub use view::{AppState, View};
