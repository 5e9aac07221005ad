use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::{Result, VigilError};
use crate::llm::backend::{ChatBackend, ChatMessage, MessageRole};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Hosted chat-completion backend.
#[derive(Clone)]
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
}

impl OpenAiBackend {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let base_url = config
            .openai_base_url
            .clone()
            .unwrap_or_else(|| OPENAI_BASE_URL.to_string());

        let openai_config = OpenAIConfig::new()
            .with_api_base(base_url)
            .with_api_key(config.openai_api_key.clone().unwrap_or_default());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                VigilError::Internal(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        // async-openai retries server errors with exponential backoff for up
        // to 15 minutes by default. Completion calls here are strictly
        // single-shot, so the backoff window is collapsed to zero.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self { client })
    }

    fn build_request(messages: &[ChatMessage], model: &str) -> Result<CreateChatCompletionRequest> {
        let mut request_messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(messages.len());

        for message in messages {
            let built: ChatCompletionRequestMessage = match message.role {
                MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(message.content.as_str())
                    .build()
                    .map_err(|error| {
                        VigilError::Validation(format!("Invalid system message: {error}"))
                    })?
                    .into(),
                MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.as_str())
                    .build()
                    .map_err(|error| {
                        VigilError::Validation(format!("Invalid user message: {error}"))
                    })?
                    .into(),
            };
            request_messages.push(built);
        }

        CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(request_messages)
            .build()
            .map_err(|error| VigilError::Validation(format!("Invalid completion request: {error}")))
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                tracing::error!("OpenAI response contained no choices");
                VigilError::BackendCallFailed("OpenAI response contained no choices".to_string())
            })?
            .message
            .content
            .unwrap_or_default();

        if content.trim().is_empty() {
            tracing::error!("OpenAI response contained empty content");
            return Err(VigilError::BackendCallFailed(
                "OpenAI response contained empty content".to_string(),
            ));
        }

        Ok(content)
    }

    fn map_error(error: OpenAIError) -> VigilError {
        match error {
            OpenAIError::InvalidArgument(message) => VigilError::Validation(message),
            OpenAIError::ApiError(api_error) => {
                VigilError::BackendCallFailed(format!("OpenAI API error: {api_error}"))
            }
            OpenAIError::Reqwest(reqwest_error) => {
                VigilError::BackendCallFailed(format!("OpenAI request failed: {reqwest_error}"))
            }
            OpenAIError::JSONDeserialize(error) => {
                VigilError::BackendCallFailed(format!("Failed to parse OpenAI response: {error}"))
            }
            other => VigilError::BackendCallFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String> {
        let request = Self::build_request(messages, model)?;

        match self.client.chat().create(request).await {
            Ok(response) => {
                let content = Self::extract_content(response)?;
                tracing::debug!(response_len = content.len(), "OpenAI completion received");
                Ok(content)
            }
            Err(error) => {
                tracing::error!(error = %error, model, "OpenAI completion call failed");
                Err(Self::map_error(error))
            }
        }
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LlmConfig {
        LlmConfig {
            backend: "openai".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_api_key: Some("test-key".to_string()),
            openai_base_url: None,
            ollama_model: "llama3.1".to_string(),
            ollama_url: "http://localhost:11434/api/chat".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_backend_builds_without_api_key() {
        // Auth failures belong to call time, not construction time.
        let mut config = test_config();
        config.openai_api_key = None;
        assert!(OpenAiBackend::new(&config).is_ok());
    }

    #[test]
    fn test_request_carries_model_and_message_order() {
        let messages = vec![
            ChatMessage::system("Summarize. Rules follow."),
            ChatMessage::user("# Progress"),
        ];
        let request = OpenAiBackend::build_request(&messages, "gpt-4o-mini").unwrap();

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 2);
        assert!(matches!(
            request.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            request.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
    }
}
