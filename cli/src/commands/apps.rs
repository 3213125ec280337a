//! `dockyard apps`: installed apps, the curated catalog, and package
//! manager operations.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use dockyard_common::ExecutionResult;
use indicatif::ProgressBar;

use crate::app::AppContext;
use crate::application::ports::{AppCache, PackageManager};
use crate::application::services::catalog;
use crate::domain::view::{AppState, View, switch_view, with_installed, with_query};
use crate::output::progress::{finish_error, finish_ok};

/// Apps subcommands.
#[derive(Subcommand)]
pub enum AppsCommand {
    /// List installed apps (refreshes the cache from the package manager)
    List {
        /// Only show apps whose name or description contains this text
        #[arg(long, short)]
        filter: Option<String>,
        /// Read the cache without calling the package manager
        #[arg(long)]
        cached: bool,
    },
    /// Search the package manager's buckets
    Search {
        /// Search text (empty lists everything)
        #[arg(default_value = "")]
        query: String,
    },
    /// Show the curated catalog of popular apps
    Available {
        /// Only show entries whose name or description contains this text
        #[arg(long, short)]
        filter: Option<String>,
    },
    /// Install an app
    Install {
        /// App name, optionally `bucket/app`
        name: String,
    },
    /// Uninstall an app
    Uninstall {
        /// App name
        name: String,
    },
    /// Update an app
    Update {
        /// App name
        name: String,
    },
}

/// Show the curated catalog. Needs neither the package manager nor the cache.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn available(app: &AppContext, filter: Option<&str>) -> Result<ExitCode> {
    let state = with_query(
        switch_view(AppState::default(), View::Available),
        filter.unwrap_or_default(),
    );
    app.renderer().render_catalog(&state.visible_available())?;
    Ok(ExitCode::SUCCESS)
}

/// Run an apps subcommand that talks to the package manager or cache.
///
/// # Errors
///
/// Returns an error if an app name is invalid or the cache cannot be used.
pub async fn run(
    app: &AppContext,
    cmd: AppsCommand,
    pm: &impl PackageManager,
    cache: &impl AppCache,
) -> Result<ExitCode> {
    match cmd {
        AppsCommand::List { filter, cached } => {
            list(app, pm, cache, filter.as_deref(), cached).await
        }
        AppsCommand::Search { query } => {
            let pb = app.spinner(&format!("Searching for '{query}'..."));
            let result = catalog::search(pm, &query).await;
            pb.finish_and_clear();
            finish(app, &result?)
        }
        AppsCommand::Available { filter } => available(app, filter.as_deref()),
        AppsCommand::Install { name } => {
            let pb = app.spinner(&format!("Installing {name}..."));
            let result = catalog::install(pm, cache, &name).await?;
            report(&pb, &result, &format!("Installed {name}"));
            finish(app, &result)
        }
        AppsCommand::Uninstall { name } => {
            if !app.confirm(&format!("Uninstall {name}?"), true)? {
                app.output.info("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            let pb = app.spinner(&format!("Uninstalling {name}..."));
            let result = catalog::uninstall(pm, cache, &name).await?;
            report(&pb, &result, &format!("Uninstalled {name}"));
            finish(app, &result)
        }
        AppsCommand::Update { name } => {
            let pb = app.spinner(&format!("Updating {name}..."));
            let result = catalog::update(pm, &name).await?;
            report(&pb, &result, &format!("Updated {name}"));
            finish(app, &result)
        }
    }
}

async fn list(
    app: &AppContext,
    pm: &impl PackageManager,
    cache: &impl AppCache,
    filter: Option<&str>,
    cached: bool,
) -> Result<ExitCode> {
    let rows = if cached {
        catalog::cached_installed(cache).await?
    } else {
        let pb = app.spinner("Reading installed apps...");
        let rows = catalog::sync_installed(pm, cache, &app.reporter()).await;
        pb.finish_and_clear();
        rows?
    };
    let state = with_query(
        switch_view(with_installed(AppState::default(), rows), View::Installed),
        filter.unwrap_or_default(),
    );
    app.renderer().render_apps(&state.visible_installed())?;
    Ok(ExitCode::SUCCESS)
}

fn report(pb: &ProgressBar, result: &ExecutionResult, done: &str) {
    if result.success {
        finish_ok(pb, done);
    } else {
        finish_error(pb, "Package manager reported a failure");
    }
}

fn finish(app: &AppContext, result: &ExecutionResult) -> Result<ExitCode> {
    app.renderer().render_result(result)?;
    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
