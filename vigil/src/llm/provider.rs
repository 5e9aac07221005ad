use std::fmt;
use std::str::FromStr;

use crate::config::LlmConfig;
use crate::error::{Result, VigilError};
use crate::llm::backend::{ChatBackend, ChatMessage};
use crate::llm::ollama::OllamaBackend;
use crate::llm::openai::OpenAiBackend;
use crate::llm::prompts::{self, TemplateStyle};

/// The closed set of completion backends reports can be generated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    OpenAi,
    Ollama,
}

impl BackendKind {
    /// Models the surrounding tooling offers for this backend.
    pub fn known_models(&self) -> &'static [&'static str] {
        match self {
            BackendKind::OpenAi => &["gpt-4o", "gpt-4o-mini", "gpt-3.5-turbo"],
            BackendKind::Ollama => &["llama3.1", "gemma2:2b", "qwen2:7b"],
        }
    }
}

impl FromStr for BackendKind {
    type Err = VigilError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "openai" => Ok(BackendKind::OpenAi),
            "ollama" => Ok(BackendKind::Ollama),
            _ => Err(VigilError::UnsupportedBackendKind(value.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::OpenAi => write!(f, "openai"),
            BackendKind::Ollama => write!(f, "ollama"),
        }
    }
}

/// Report generation facade: one resolved backend, one template style.
///
/// Construction resolves the backend kind exactly once; an unrecognized
/// kind fails right there and leaves nothing half-built. There is no
/// fallback between backends and no state carried across calls, so building
/// a fresh provider per request is the expected usage.
pub struct LlmProvider {
    backend: Box<dyn ChatBackend>,
    kind: BackendKind,
    model: String,
    template: TemplateStyle,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig, template: TemplateStyle) -> Result<Self> {
        let kind = match config.backend.parse::<BackendKind>() {
            Ok(kind) => kind,
            Err(error) => {
                tracing::error!(backend = %config.backend, "Unsupported LLM backend kind");
                return Err(error);
            }
        };

        let (backend, model): (Box<dyn ChatBackend>, String) = match kind {
            BackendKind::OpenAi => (
                Box::new(OpenAiBackend::new(config)?),
                config.openai_model.clone(),
            ),
            BackendKind::Ollama => (
                Box::new(OllamaBackend::new(config)?),
                config.ollama_model.clone(),
            ),
        };

        tracing::info!(backend = %kind, model = %model, template = %template, "LLM backend selected");

        Ok(Self {
            backend,
            kind,
            model,
            template,
        })
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn template(&self) -> TemplateStyle {
        self.template
    }

    /// Generate one report from raw exported content.
    ///
    /// The system prompt is augmented with the configured template, paired
    /// with `user_content` as a system + user exchange, and dispatched to
    /// the selected backend. The backend's output is returned as-is; any
    /// shaping beyond what the template requests is the model's business.
    pub async fn generate_report(&self, system_prompt: &str, user_content: &str) -> Result<String> {
        if system_prompt.trim().is_empty() {
            tracing::error!("Rejected report generation: empty system prompt");
            return Err(VigilError::Validation(
                "System prompt cannot be empty".to_string(),
            ));
        }

        let composed = prompts::augment(system_prompt, user_content, self.template);
        let messages = [
            ChatMessage::system(composed),
            ChatMessage::user(user_content),
        ];

        tracing::info!(
            backend = self.backend.name(),
            model = %self.model,
            content_len = user_content.len(),
            "Generating report"
        );

        let report = self.backend.complete(&messages, &self.model).await?;
        tracing::debug!(report_len = report.len(), "Report generated");

        Ok(report)
    }
}
