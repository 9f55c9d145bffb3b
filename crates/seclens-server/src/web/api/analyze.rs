// crates/seclens-server/src/web/api/analyze.rs
// POST /api/analyze

use axum::{Json, body::Bytes, extract::State};
use seclens_types::AnalysisResult;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, SeclensError};
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Pull `code` out of a raw request body.
///
/// Anything but a JSON object with a non-empty string `code` is rejected
/// here, before the remote model is involved.
pub fn extract_code(body: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| SeclensError::InvalidInput(format!("body is not JSON: {}", e)))?;

    match value.get("code") {
        Some(Value::String(code)) if !code.is_empty() => Ok(code.clone()),
        Some(Value::String(_)) => Err(SeclensError::InvalidInput("code is empty".into())),
        Some(_) => Err(SeclensError::InvalidInput("code is not a string".into())),
        None => Err(SeclensError::InvalidInput("code is missing".into())),
    }
}

pub async fn analyze(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<AnalysisResult>> {
    let code = extract_code(&body).map_err(|e| {
        debug!(error = %e, "Rejected analysis request");
        ApiError::invalid_request()
    })?;

    if !state.analyze_delay.is_zero() {
        tokio::time::sleep(state.analyze_delay).await;
    }

    let result = state
        .analyzer
        .analyze(&code)
        .await
        .map_err(|e| ApiError::from_analysis_failure(&e))?;

    info!(
        code_len = code.len(),
        vulnerabilities = result.vulnerabilities.len(),
        "Analysis served"
    );
    Ok(Json(result))
}
