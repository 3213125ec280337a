//! `dockyard ask`: turn a question into up to three shell commands.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use dockyard_common::SuggestionsOutput;

use crate::app::AppContext;
use crate::application::ports::{CompletionClient, ShellRunner};
use crate::application::services::{assistant, command_exec};
use crate::commands::exec;
use crate::output::progress::{finish_error, finish_ok};

/// Arguments for the ask command.
#[derive(Args)]
pub struct AskArgs {
    /// What you want to do, in plain words
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Run suggestion <N> (1-based) instead of listing them
    #[arg(long, value_name = "N")]
    pub run: Option<usize>,
}

/// Ask the assistant and either list or run its suggestions.
///
/// # Errors
///
/// Returns an error if the completion request fails or `--run` names a
/// suggestion that does not exist.
pub async fn run(
    app: &AppContext,
    args: &AskArgs,
    client: &impl CompletionClient,
    shell: &impl ShellRunner,
) -> Result<ExitCode> {
    let question = args.question.join(" ");

    let pb = app.spinner("Asking the assistant...");
    let suggestions = match assistant::suggest(client, &question).await {
        Ok(s) => {
            finish_ok(&pb, "Got suggestions");
            s
        }
        Err(e) => {
            finish_error(&pb, "Assistant request failed");
            return Err(e);
        }
    };

    let Some(index) = args.run else {
        app.renderer().render_suggestions(&SuggestionsOutput {
            question,
            suggestions,
        })?;
        return Ok(ExitCode::SUCCESS);
    };

    let command = assistant::pick(&suggestions, index)?;
    if !app.confirm(&format!("Run `{command}`?"), true)? {
        app.output.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }
    let report = command_exec::execute(shell, command).await?;
    exec::finish(app, &report)
}
