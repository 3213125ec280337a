//! `dockyard status`: installed app count and container engine state.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::{AppCache, ContainerEngine};
use crate::application::services::overview;

/// Show the overview built from the cache and one daemon probe.
///
/// # Errors
///
/// Returns an error if the cache cannot be read.
pub async fn run(
    app: &AppContext,
    cache: &impl AppCache,
    engine: &impl ContainerEngine,
) -> Result<ExitCode> {
    let status = overview::gather_status(cache, engine).await?;
    app.renderer().render_status(&status)?;
    Ok(ExitCode::SUCCESS)
}
