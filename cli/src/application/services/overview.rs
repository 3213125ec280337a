//! Application service: `dockyard status` overview.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;
use dockyard_common::StatusOutput;

use crate::application::ports::{AppCache, ContainerEngine};
use crate::application::services::containers::daemon_status;
use crate::domain::view::{AppState, with_installed};

/// Build the view state from the cache.
///
/// # Errors
///
/// Returns an error if the cache cannot be read.
pub async fn load_state(cache: &impl AppCache) -> Result<AppState> {
    let installed = cache.installed().await?;
    Ok(with_installed(AppState::default(), installed))
}

/// Gather the overview. The daemon is only probed when an engine is
/// installed.
///
/// # Errors
///
/// Returns an error if the cache cannot be read.
pub async fn gather_status(
    cache: &impl AppCache,
    engine: &impl ContainerEngine,
) -> Result<StatusOutput> {
    let state = load_state(cache).await?;
    let daemon = if state.engine_installed {
        Some(daemon_status(engine).await)
    } else {
        None
    };
    Ok(StatusOutput {
        installed_apps: state.installed.len(),
        engine_installed: state.engine_installed,
        daemon,
    })
}
