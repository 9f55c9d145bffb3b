// crates/seclens-server/src/llm/openai_compat/response.rs
// OpenAI-compatible chat response parsing

use serde::Deserialize;

use crate::error::{Result, SeclensError};
use crate::llm::Completion;

/// Non-streaming chat response (OpenAI-compatible format)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Error envelope: `{"error": {"message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Parse an OpenAI-compatible chat response into a Completion.
///
/// Only the first candidate is read. Missing candidates or content give an
/// empty text rather than an error; the caller decides what empty means.
pub fn parse_chat_response(
    response_body: &str,
    request_id: &str,
    duration_ms: u64,
) -> Result<Completion> {
    let data: ChatResponse = serde_json::from_str(response_body)
        .map_err(|e| SeclensError::Parse(format!("invalid chat completion payload: {}", e)))?;

    let content = data
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .unwrap_or_default();

    Ok(Completion {
        request_id: request_id.to_owned(),
        content,
        usage: data.usage,
        duration_ms,
    })
}

/// Extract the provider's reported reason from an error body, if any
pub fn parse_error_reason(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()?
        .error?
        .message
        .filter(|m| !m.trim().is_empty())
}
