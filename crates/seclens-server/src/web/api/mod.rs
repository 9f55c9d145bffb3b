// crates/seclens-server/src/web/api/mod.rs
// REST API handlers

mod analyze;

use axum::{Json, response::IntoResponse};
use seclens_types::HealthStatus;

pub use analyze::{analyze, extract_code};

// ═══════════════════════════════════════
// HEALTH
// ═══════════════════════════════════════

pub async fn health() -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
