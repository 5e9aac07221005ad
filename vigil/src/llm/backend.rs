use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Role of one message in a completion exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// A role/content pair. One report exchange is exactly two of these:
/// the composed system prompt followed by the raw exported content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A single-shot completion backend.
///
/// Implementations hold no cross-call state: each call is one
/// request/response round trip, with no retry and no fallback to
/// another backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
