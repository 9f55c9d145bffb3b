// crates/seclens-server/src/analysis/mod.rs
// Prompt/response adapter between seclens and the remote model

mod parse;
mod prompt;

pub use parse::{extract_fenced_json, parse_reply};
pub use prompt::{SYSTEM_PROMPT, user_prompt};

use seclens_types::AnalysisResult;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::llm::{ChatRequest, CompletionClient};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Low temperature keeps the reply machine-parseable
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Turns a code snippet into a normalized [`AnalysisResult`] via the
/// remote model.
#[derive(Clone)]
pub struct Analyzer {
    client: Arc<dyn CompletionClient>,
    model: String,
    temperature: f32,
}

impl Analyzer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Request built for `code`; exposed so callers can inspect the prompt
    pub fn build_request(&self, code: &str) -> ChatRequest {
        ChatRequest::new(self.model.clone(), prompt::messages(code))
            .with_temperature(self.temperature)
    }

    /// Analyze `code`. Emptiness is not checked here; that is the caller's
    /// job.
    #[instrument(skip(self, code), fields(model = %self.model, code_len = code.len()))]
    pub async fn analyze(&self, code: &str) -> Result<AnalysisResult> {
        let request = self.build_request(code);
        let completion = self.client.complete(&request).await?;

        debug!(
            request_id = %completion.request_id,
            reply_len = completion.content.len(),
            "Parsing model reply"
        );

        let result = parse_reply(&completion.content)?;

        debug!(
            request_id = %completion.request_id,
            vulnerabilities = result.vulnerabilities.len(),
            "Analysis complete"
        );
        Ok(result)
    }
}
