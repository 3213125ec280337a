//! Application service: ask the completion API for candidate commands.

use anyhow::Result;

use crate::application::ports::CompletionClient;
use crate::domain::assistant::render_prompt;
use crate::domain::error::AssistantError;
use crate::domain::suggestion::parse_suggestions;

/// Ask `question` and return up to three cleaned-up suggestions.
///
/// # Errors
///
/// Returns an error if the completion request fails.
pub async fn suggest(client: &impl CompletionClient, question: &str) -> Result<Vec<String>> {
    let prompt = render_prompt(question);
    let content = client.complete(&prompt).await?;
    let suggestions = parse_suggestions(&content);
    tracing::debug!(count = suggestions.len(), "parsed suggestions");
    Ok(suggestions)
}

/// The 1-based `index`-th suggestion.
///
/// # Errors
///
/// Returns [`AssistantError::NoSuchSuggestion`] when out of range.
pub fn pick(suggestions: &[String], index: usize) -> Result<&str> {
    index
        .checked_sub(1)
        .and_then(|i| suggestions.get(i))
        .map(String::as_str)
        .ok_or_else(|| {
            AssistantError::NoSuchSuggestion {
                index,
                available: suggestions.len(),
            }
            .into()
        })
}
