//! Infrastructure implementation of the `CompletionClient` port.
//!
//! One chat-completions request per question, bearer-authenticated, no
//! retries.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::ports::CompletionClient;
use crate::domain::assistant::{MAX_TOKENS, TEMPERATURE};
use crate::domain::config::AssistantConfig;
use crate::domain::error::AssistantError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "DOCKYARD_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

pub struct HttpCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl HttpCompletionClient {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::MissingApiKey`] when no key is given, or an
    /// error if the HTTP client cannot be built.
    pub fn new(config: &AssistantConfig, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(AssistantError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("dockyard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Build a client with the key taken from [`API_KEY_ENV`].
    ///
    /// # Errors
    ///
    /// See [`HttpCompletionClient::new`].
    pub fn from_env(config: &AssistantConfig) -> Result<Self> {
        Self::new(config, std::env::var(API_KEY_ENV).ok())
    }
}

impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("completion request to {} failed", self.endpoint))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "completion response");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Upstream {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let reply: ChatResponse = response
            .json()
            .await
            .context("invalid completion response")?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AssistantError::EmptyResponse.into())
    }
}
