// crates/seclens-server/src/llm/openai.rs
// OpenAI chat completions client

use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::logging::{log_completion, log_usage};
use super::openai_compat::{parse_chat_response, parse_error_reason};
use super::{ChatRequest, Completion, CompletionClient};
use crate::error::{Result, SeclensError};

/// Default API root; `/chat/completions` is appended
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Fallback reason when the provider's error body carries none
const GENERIC_UPSTREAM_REASON: &str = "OpenAI API error";

/// OpenAI API client
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client against the public OpenAI endpoint.
    ///
    /// The credential is injected here once; nothing downstream reads the
    /// environment.
    pub fn new(api_key: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        }
    }

    /// Point the client at another OpenAI-compatible API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn provider_name(&self) -> &'static str {
        "OpenAI"
    }

    #[instrument(skip(self, request), fields(model = %request.model, message_count = request.messages.len()))]
    async fn complete(&self, request: &ChatRequest) -> Result<Completion> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        debug!(request_id = %request_id, url = %self.endpoint(), "Sending chat completion");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message =
                parse_error_reason(&body).unwrap_or_else(|| GENERIC_UPSTREAM_REASON.to_string());
            warn!(
                request_id = %request_id,
                status = %status,
                duration_ms = duration_ms,
                reason = %message,
                "OpenAI returned an error status"
            );
            return Err(SeclensError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let completion = parse_chat_response(&body, &request_id, duration_ms)?;

        if let Some(ref usage) = completion.usage {
            log_usage(&request_id, self.provider_name(), usage);
        }
        log_completion(
            &request_id,
            self.provider_name(),
            duration_ms,
            completion.content.len(),
        );

        Ok(completion)
    }
}
