//! `dockyard config`: show and set configuration values.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key, e.g. `engine.memory_gb`
        key: String,
        /// Configuration value
        value: String,
    },
    /// Restore the engine settings to their defaults
    ResetEngine,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the config file cannot
/// be read or written.
pub fn run(app: &AppContext, cmd: ConfigCommand, store: &impl ConfigStore) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app, store),
        ConfigCommand::Set { key, value } => {
            let config = config_service::set_value(store, &key, &value)?;
            if app.is_json() {
                app.renderer().render_config(&config, &store.path()?)?;
            } else {
                app.output.success(&format!("Set {key} = {value}"));
            }
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::ResetEngine => {
            if !app.confirm("Reset engine settings to defaults?", true)? {
                app.output.info("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            let config = config_service::reset_engine(store)?;
            if app.is_json() {
                app.renderer().render_config(&config, &store.path()?)?;
            } else {
                app.output.success("Engine settings reset to defaults");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show_config(app: &AppContext, store: &impl ConfigStore) -> Result<ExitCode> {
    let config = config_service::load_config(store)?;
    let path = store.path()?;
    app.renderer().render_config(&config, &path)?;
    Ok(ExitCode::SUCCESS)
}
