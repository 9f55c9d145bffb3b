//! OpenAiClient against a local stand-in for the chat completions API

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use seclens::analysis::{Analyzer, SYSTEM_PROMPT};
use seclens::http::create_shared_client;
use seclens::llm::{ChatRequest, CompletionClient, Message, OpenAiClient};
use seclens::SeclensError;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// What the stand-in saw on its last request
#[derive(Default)]
struct Captured {
    authorization: Option<String>,
    body: Option<Value>,
}

#[derive(Clone)]
struct StubApi {
    status: StatusCode,
    reply: Value,
    captured: Arc<Mutex<Captured>>,
}

async fn chat_completions(
    State(api): State<StubApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut captured = api.captured.lock().unwrap();
    captured.authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured.body = Some(body);
    (api.status, Json(api.reply.clone()))
}

/// Start the stand-in on an ephemeral port; returns its API root
async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Captured>>) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let api = StubApi {
        status,
        reply,
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1"), captured)
}

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
    })
}

#[tokio::test]
async fn test_sends_bearer_and_request_body() {
    let (base_url, captured) = spawn_stub(StatusCode::OK, completion_body("hello")).await;
    let client = OpenAiClient::new("sk-test", create_shared_client()).with_base_url(base_url);

    let request = ChatRequest::new(
        "gpt-4o-mini",
        vec![Message::system("be brief"), Message::user("hi")],
    )
    .with_temperature(0.2);
    let completion = client.complete(&request).await.unwrap();

    assert_eq!(completion.content, "hello");
    let usage = completion.usage.unwrap();
    assert_eq!(usage.total_tokens, 160);

    let captured = captured.lock().unwrap();
    assert_eq!(captured.authorization.as_deref(), Some("Bearer sk-test"));
    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["model"], "gpt-4o-mini");
    assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    assert_eq!(body["messages"][0], json!({"role": "system", "content": "be brief"}));
    assert_eq!(body["messages"][1], json!({"role": "user", "content": "hi"}));
}

#[tokio::test]
async fn test_error_status_carries_provider_reason() {
    let (base_url, _) = spawn_stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "Rate limit reached", "type": "requests"}}),
    )
    .await;
    let client = OpenAiClient::new("sk-test", create_shared_client()).with_base_url(base_url);

    let err = client
        .complete(&ChatRequest::new("gpt-4o-mini", vec![Message::user("x")]))
        .await
        .unwrap_err();

    match err {
        SeclensError::Upstream { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_without_reason_is_generic() {
    let (base_url, _) = spawn_stub(StatusCode::BAD_GATEWAY, json!({"oops": true})).await;
    let client = OpenAiClient::new("sk-test", create_shared_client()).with_base_url(base_url);

    let err = client
        .complete(&ChatRequest::new("gpt-4o-mini", vec![Message::user("x")]))
        .await
        .unwrap_err();

    match err {
        SeclensError::Upstream { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "OpenAI API error");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_analyzer_end_to_end_over_http() {
    let reply = "Findings below.\n```json\n{\"vulnerabilities\":[\"Command injection via os.system\"],\"fixedCode\":\"subprocess.run([\\\"ls\\\", path])\"}\n```";
    let (base_url, captured) = spawn_stub(StatusCode::OK, completion_body(reply)).await;
    let client = OpenAiClient::new("sk-test", create_shared_client()).with_base_url(base_url);
    let analyzer = Analyzer::new(Arc::new(client));

    let result = analyzer.analyze("os.system('ls ' + path)").await.unwrap();

    assert_eq!(result.vulnerabilities, vec!["Command injection via os.system"]);
    assert_eq!(result.fixed_code, "subprocess.run([\"ls\", path])");

    let captured = captured.lock().unwrap();
    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("os.system('ls ' + path)"));
}
