//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Package and container manager front-end with a command assistant
#[derive(Parser)]
#[command(
    name = "dockyard",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a shell command after the safety check
    Exec(commands::exec::ExecArgs),

    /// Ask the assistant for shell commands
    Ask(commands::ask::AskArgs),

    /// Manage installed apps
    #[command(subcommand)]
    Apps(commands::apps::AppsCommand),

    /// Manage containers
    #[command(subcommand)]
    Containers(commands::containers::ContainersCommand),

    /// Show installed apps and container engine state
    Status,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        });

        match command {
            Command::Version => commands::version::run(&app),
            Command::Exec(args) => commands::exec::run(&app, &args, &app.shell()).await,
            Command::Ask(args) => {
                let config = app.config()?;
                let client = app.completion_client(&config)?;
                commands::ask::run(&app, &args, &client, &app.shell()).await
            }
            Command::Apps(commands::apps::AppsCommand::Available { filter }) => {
                commands::apps::available(&app, filter.as_deref())
            }
            Command::Apps(cmd) => {
                let config = app.config()?;
                let pm = app.package_manager(&config);
                let cache = app.app_cache()?;
                commands::apps::run(&app, cmd, &pm, &cache).await
            }
            Command::Containers(cmd) => {
                let config = app.config()?;
                let engine = app.container_engine(&config);
                commands::containers::run(&app, cmd, &engine).await
            }
            Command::Status => {
                let config = app.config()?;
                let cache = app.app_cache()?;
                let engine = app.container_engine(&config);
                commands::status::run(&app, &cache, &engine).await
            }
            Command::Config(cmd) => commands::config::run(&app, cmd, &app.config_store),
        }
    }
}
