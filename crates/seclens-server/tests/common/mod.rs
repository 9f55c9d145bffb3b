//! Test utilities for seclens integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use seclens::analysis::Analyzer;
use seclens::llm::{ChatRequest, Completion, CompletionClient};
use seclens::web::{create_router, state::AppState};
use seclens::{Result, SeclensError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What the stub remote model does on every call
#[derive(Clone)]
pub enum StubReply {
    Text(String),
    Status(u16, String),
}

/// Remote model stand-in that counts calls
pub struct StubClient {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubClient {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: StubReply::Text(text.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(status: u16, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: StubReply::Status(status, message.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, _request: &ChatRequest) -> Result<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Text(text) => Ok(Completion::new("stub", text.clone())),
            StubReply::Status(status, message) => Err(SeclensError::Upstream {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "Stub"
    }
}

/// Router wired to `client` with the simulated delay disabled
pub fn test_app(client: Arc<StubClient>) -> Router {
    let state = AppState::new(Analyzer::new(client)).with_delay(Duration::ZERO);
    create_router(state)
}

pub fn post_analyze(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
