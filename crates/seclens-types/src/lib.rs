// crates/seclens-types/src/lib.rs
// Shared types for seclens (native + WASM compatible)
// No native-only dependencies allowed here

use serde::{Deserialize, Serialize};

/// Route of the analysis endpoint, relative to the server root
pub const ANALYZE_PATH: &str = "/api/analyze";

// ═══════════════════════════════════════
// ANALYSIS API
// ═══════════════════════════════════════

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub code: String,
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Normalized outcome of one security analysis.
///
/// Both fields are always present on the wire; an analysis that found
/// nothing still carries an empty `vulnerabilities` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub vulnerabilities: Vec<String>,
    #[serde(default)]
    pub fixed_code: String,
}

impl AnalysisResult {
    pub fn new(vulnerabilities: Vec<String>, fixed_code: impl Into<String>) -> Self {
        Self {
            vulnerabilities,
            fixed_code: fixed_code.into(),
        }
    }
}

/// Error body returned with every non-2xx status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ═══════════════════════════════════════
// HEALTH
// ═══════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}
