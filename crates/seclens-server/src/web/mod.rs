// crates/seclens-server/src/web/mod.rs
// Web server layer for seclens

pub mod api;
pub mod error;
pub mod state;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use seclens_types::ErrorBody;
use std::any::Any;
use std::path::Path;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::web::error::ANALYSIS_FAILED_MESSAGE;
use crate::web::state::AppState;

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    build_router(state, None)
}

/// Router that also serves the compiled frontend from `assets_dir`.
/// Unknown paths fall back to `index.html`.
pub fn create_router_with_assets(state: AppState, assets_dir: &Path) -> Router {
    build_router(state, Some(assets_dir))
}

fn build_router(state: AppState, assets_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    // API routes (REST)
    let api_router = Router::new()
        .route("/health", get(api::health))
        .route("/analyze", post(api::analyze))
        .with_state(state);

    let mut router = Router::new()
        // Health check at root level
        .route("/health", get(api::health))
        // API routes
        .nest("/api", api_router);

    // Static files sit under the same layers as the API
    if let Some(dir) = assets_dir {
        let index = ServeFile::new(dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(dir).fallback(index));
    }

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Panics inside a handler become the same generic 500 as any other
/// analysis failure.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(kind = "unexpected", panic = %detail, "Handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(ErrorBody::new(ANALYSIS_FAILED_MESSAGE)),
    )
        .into_response()
}
