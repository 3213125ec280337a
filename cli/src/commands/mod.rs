//! Command implementations

pub mod apps;
pub mod ask;
pub mod config;
pub mod containers;
pub mod exec;
pub mod status;
pub mod version;
