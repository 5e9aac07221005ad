use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{Result, VigilError};
use crate::llm::backend::{ChatBackend, ChatMessage};

const MAX_OUTPUT_TOKENS: u32 = 4000;
const SAMPLING_TEMPERATURE: f64 = 0.7;

/// Local inference backend speaking the Ollama chat protocol.
#[derive(Clone, Debug)]
pub struct OllamaBackend {
    client: Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f64,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaMessage>,
    done: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: Option<String>,
}

impl OllamaBackend {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                VigilError::Internal(format!("Failed to create Ollama HTTP client: {error}"))
            })?;

        Ok(Self {
            client,
            url: config.ollama_url.clone(),
        })
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    async fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String> {
        let payload = OllamaChatRequest {
            model,
            messages,
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: SAMPLING_TEMPERATURE,
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                tracing::error!(error = %error, url = %self.url, "Ollama request failed");
                VigilError::BackendCallFailed(format!("Ollama request failed: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, url = %self.url, "Ollama returned an error status");
            return Err(VigilError::BackendCallFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let envelope: OllamaChatResponse = response.json().await.map_err(|error| {
            tracing::error!(error = %error, "Ollama response did not match the chat envelope");
            VigilError::MalformedBackendResponse(format!(
                "Ollama response did not match the chat envelope: {error}"
            ))
        })?;

        if envelope.done == Some(false) {
            tracing::debug!(model, "Ollama reported an incomplete generation");
        }

        let content = envelope
            .message
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty());

        match content {
            Some(content) => {
                tracing::debug!(response_len = content.len(), "Ollama completion received");
                Ok(content)
            }
            None => {
                tracing::error!(url = %self.url, "Ollama response contained no message content");
                Err(VigilError::MalformedBackendResponse(
                    "Ollama response contained no message content".to_string(),
                ))
            }
        }
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
