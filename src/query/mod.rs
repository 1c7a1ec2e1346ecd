//! Natural-language query handling.
//!
//! [`QueryClient`] sends the user's request to an OpenAI-compatible chat
//! completions endpoint and returns the raw reply; [`extract_command`] then
//! pulls the shell command out of it.

mod extract;

pub use extract::extract_command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GlobalConfig;
use crate::core::{HowtoError, HowtoResult};
use crate::utils::http::http_client;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
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
    #[serde(default)]
    content: Option<String>,
}

fn system_prompt() -> String {
    let shell = std::env::var("SHELL")
        .ok()
        .and_then(|s| s.rsplit('/').next().map(str::to_string))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            if cfg!(windows) {
                "powershell".to_string()
            } else {
                "sh".to_string()
            }
        });

    format!(
        "You translate requests into shell commands for {} using {}. \
         Reply with exactly one fenced code block containing the command and nothing else.",
        std::env::consts::OS,
        shell
    )
}

/// Client for the model API.
pub struct QueryClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl QueryClient {
    /// Build a client from the user's configuration.
    ///
    /// Fails with [`HowtoError::MissingApiKey`] when no API key is available.
    pub fn new(config: &GlobalConfig) -> HowtoResult<Self> {
        Ok(Self {
            client: http_client()?,
            api_url: config.api_url.clone(),
            api_key: config.api_key()?,
            model: config.model.clone(),
        })
    }

    /// Ask the model for a command answering `query`; returns the reply text.
    pub async fn ask(&self, query: &str) -> HowtoResult<String> {
        let system = system_prompt();
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
        };

        debug!("Querying {} with model {}", self.api_url, self.model);
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| HowtoError::network(&self.api_url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HowtoError::NetworkError {
                url: self.api_url.clone(),
                message: format!("HTTP {status}"),
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| HowtoError::ResponseParseError {
            reason: e.to_string(),
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| HowtoError::ResponseParseError {
                reason: "reply contained no message".to_string(),
            })
    }
}
