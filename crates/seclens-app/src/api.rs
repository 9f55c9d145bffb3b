// crates/seclens-app/src/api.rs
// HTTP API functions for communicating with the seclens server

use seclens_types::{ANALYZE_PATH, AnalysisRequest, AnalysisResult, ErrorBody};

use crate::session::AnalysisTransport;

/// Shown when the server answered with an error but no message
pub const ANALYZE_FAILED: &str = "Failed to analyze code";

/// Shown when the server could not be reached or replied with garbage
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

pub async fn analyze_code(code: &str) -> Result<AnalysisResult, String> {
    let resp = gloo_net::http::Request::post(ANALYZE_PATH)
        .json(&AnalysisRequest::new(code))
        .map_err(transport_error)?
        .send()
        .await
        .map_err(transport_error)?;

    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        return Err(failure_message(&body));
    }

    resp.json::<AnalysisResult>().await.map_err(transport_error)
}

fn transport_error(e: gloo_net::Error) -> String {
    log::error!("Analyze request failed: {:?}", e);
    UNEXPECTED_ERROR.to_string()
}

/// Message for a non-2xx reply: the body's `error` field when present
pub fn failure_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| ANALYZE_FAILED.to_string())
}

/// [`AnalysisTransport`] backed by the server's analysis endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

impl AnalysisTransport for HttpTransport {
    async fn analyze(&self, code: String) -> Result<AnalysisResult, String> {
        analyze_code(&code).await
    }
}
