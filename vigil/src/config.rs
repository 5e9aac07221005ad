use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub report: ReportConfig,
}

/// LLM backend configuration for report generation
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Which backend serves completion calls: "openai" or "ollama".
    pub backend: String,
    pub openai_model: String,
    pub openai_api_key: Option<String>,
    /// Override for the hosted API base URL (proxies, mock servers).
    pub openai_base_url: Option<String>,
    pub ollama_model: String,
    /// Full chat endpoint URL of the local inference server.
    pub ollama_url: String,
    pub timeout_secs: u64,
}

/// Report shaping configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Which prompt template version to apply: "iteration" or "structured".
    pub template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                backend: env::var("LLM_BACKEND").unwrap_or_else(|_| "openai".to_string()),
                openai_model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
                openai_base_url: env::var("OPENAI_BASE_URL").ok(),
                ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.1".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434/api/chat".to_string()),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 120),
            },
            report: ReportConfig {
                template: env::var("REPORT_TEMPLATE").unwrap_or_else(|_| "iteration".to_string()),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
