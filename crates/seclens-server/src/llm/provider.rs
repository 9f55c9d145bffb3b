// crates/seclens-server/src/llm/provider.rs
// LLM provider abstraction layer

use async_trait::async_trait;

use super::{ChatRequest, Usage};
use crate::error::Result;

/// Text returned by one completion call
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub request_id: String,
    /// Content of the first candidate message, trimmed. Empty when the
    /// provider returned no candidates or no content.
    pub content: String,
    pub usage: Option<Usage>,
    pub duration_ms: u64,
}

impl Completion {
    pub fn new(request_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            content: content.into(),
            usage: None,
            duration_ms: 0,
        }
    }
}

/// Trait for chat completion clients.
///
/// The analysis adapter only talks to this trait, so tests swap in a stub
/// transport and the binary wires up [`super::OpenAiClient`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one chat completion request and return the first candidate's text
    async fn complete(&self, request: &ChatRequest) -> Result<Completion>;

    /// Human-readable provider name for logs
    fn provider_name(&self) -> &'static str;
}
