//! Unit tests for dockyard CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod helpers;
mod mocks;

mod ask_command;
mod config_store;
mod containers_command;
mod exec_command;
