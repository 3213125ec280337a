//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! host shell, package and container CLIs, the completion HTTP client, the
//! SQLite app cache and the YAML config file.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod cache;
pub mod command_runner;
pub mod completion;
pub mod config;
pub mod container_cli;
pub mod package_cli;
pub mod shell;
