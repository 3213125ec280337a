//! Dockyard CLI - package and container manager front-end with a command assistant

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dockyard_cli::cli::Cli;
use dockyard_cli::output::json::{error_code, format_error};

/// Environment variable holding the log filter, e.g. `DOCKYARD_LOG=debug`.
const LOG_ENV: &str = "DOCKYARD_LOG";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if json {
                match format_error(&format!("{e:#}"), error_code(&e)) {
                    Ok(text) => println!("{text}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
