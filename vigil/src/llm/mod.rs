mod backend;
mod ollama;
mod openai;
pub mod prompts;
mod provider;

pub use backend::{ChatBackend, ChatMessage, MessageRole};
pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;
pub use provider::{BackendKind, LlmProvider};
