//! `dockyard containers`: list and control containers through the engine CLI.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use dockyard_common::ExecutionResult;

use crate::app::AppContext;
use crate::application::ports::ContainerEngine;
use crate::application::services::containers;
use crate::domain::container::{DAEMON_POLL_ATTEMPTS, DAEMON_POLL_INTERVAL, ENGINE_RESTART_PAUSE};

/// Containers subcommands.
#[derive(Subcommand)]
pub enum ContainersCommand {
    /// List containers
    List {
        /// Include stopped containers
        #[arg(long, short)]
        all: bool,
    },
    /// Start a container
    Start {
        /// Container id or name
        id: String,
    },
    /// Stop a container
    Stop {
        /// Container id or name
        id: String,
    },
    /// Remove a container
    Rm {
        /// Container id or name
        id: String,
    },
    /// Stop every running container
    StopAll,
    /// Check whether the container daemon answers
    Status,
    /// Wait for the container daemon to come up
    Wait,
    /// Stop every container, then shut the engine backend down
    EngineStop,
    /// Shut the engine backend down, launch it again and wait for it
    EngineRestart,
}

/// Run a containers subcommand.
///
/// # Errors
///
/// Returns an error if an id is invalid, the engine fails unexpectedly, or
/// the daemon never becomes ready.
pub async fn run(
    app: &AppContext,
    cmd: ContainersCommand,
    engine: &impl ContainerEngine,
) -> Result<ExitCode> {
    match cmd {
        ContainersCommand::List { all } => {
            let list = containers::list(engine, all).await?;
            app.renderer().render_containers(&list)?;
            Ok(ExitCode::SUCCESS)
        }
        ContainersCommand::Start { id } => finish(app, &containers::start(engine, &id).await?),
        ContainersCommand::Stop { id } => finish(app, &containers::stop(engine, &id).await?),
        ContainersCommand::Rm { id } => {
            if !app.confirm(&format!("Remove container {id}?"), true)? {
                app.output.info("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            finish(app, &containers::remove(engine, &id).await?)
        }
        ContainersCommand::StopAll => {
            let pb = app.spinner("Stopping containers...");
            let result = containers::stop_all(engine).await;
            pb.finish_and_clear();
            finish(app, &result)
        }
        ContainersCommand::Status => {
            let status = containers::daemon_status(engine).await;
            app.renderer().render_daemon(&status)?;
            Ok(if status.running {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        ContainersCommand::Wait => {
            let status = containers::wait_until_ready(
                engine,
                &app.reporter(),
                DAEMON_POLL_ATTEMPTS,
                DAEMON_POLL_INTERVAL,
            )
            .await?;
            app.renderer().render_daemon(&status)?;
            Ok(ExitCode::SUCCESS)
        }
        ContainersCommand::EngineStop => {
            if !app.confirm("Stop all containers and the container engine?", true)? {
                app.output.info("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            let pb = app.spinner("Stopping container engine...");
            let result = containers::engine_stop(engine).await;
            pb.finish_and_clear();
            finish(app, &result)
        }
        ContainersCommand::EngineRestart => {
            let status = containers::engine_restart(
                engine,
                &app.reporter(),
                ENGINE_RESTART_PAUSE,
                DAEMON_POLL_ATTEMPTS,
                DAEMON_POLL_INTERVAL,
            )
            .await?;
            app.renderer().render_daemon(&status)?;
            Ok(ExitCode::SUCCESS)
        }
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
