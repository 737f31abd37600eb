use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use medswap_ai::{
    AiError, AnalysisOutcome, AnalyzerConfig, EfficiencyAnalyzer, GeminiClient, GenerationRequest,
    RiskLevel, TextGenerator,
};
use medswap_inventory::seed;

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn generate(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.seen.lock().unwrap().push((key, body));
    (stub.status, Json(stub.reply.clone()))
}

async fn spawn_stub(status: StatusCode, reply: Value) -> (SocketAddr, Arc<Mutex<Vec<(Option<String>, Value)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        reply,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/v1beta/models/:model", post(generate))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

fn client(addr: SocketAddr) -> GeminiClient {
    GeminiClient::new(
        AnalyzerConfig::default()
            .with_api_key("test-key")
            .with_endpoint(format!("http://{addr}/v1beta"))
            .with_model("test-model")
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
}

#[tokio::test]
async fn sends_schema_constrained_request_with_key_header() {
    let (addr, seen) = spawn_stub(StatusCode::OK, candidate("{}")).await;
    let request = GenerationRequest::for_items(&seed::demo_items()).unwrap();

    let text = client(addr).generate(&request).await.unwrap();
    assert_eq!(text, "{}");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (key, body) = &seen[0];
    assert_eq!(key.as_deref(), Some("test-key"));
    assert_eq!(body["contents"][0]["parts"][0]["text"], request.prompt.as_str());
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(body["generationConfig"]["responseSchema"], request.response_schema);
}

#[tokio::test]
async fn analyzer_end_to_end_over_http() {
    let reply = candidate(
        r#"{"riskLevel":"High","recommendations":["Swap Amoxicillin with Green Valley"],"potentialSavings":"$4,500.00"}"#,
    );
    let (addr, _) = spawn_stub(StatusCode::OK, reply).await;

    let analyzer = EfficiencyAnalyzer::new(Arc::new(client(addr)));
    let result = analyzer.analyze(&seed::demo_items()).await;

    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.recommendations, vec!["Swap Amoxicillin with Green Valley"]);
    assert_eq!(result.potential_savings, "$4,500.00");
    assert_eq!(result.outcome, AnalysisOutcome::Generated);
}

#[tokio::test]
async fn error_status_is_reported_and_falls_back() {
    let (addr, _) = spawn_stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "message": "quota exceeded" } }),
    )
    .await;
    let request = GenerationRequest::for_items(&[]).unwrap();

    let err = client(addr).generate(&request).await.unwrap_err();
    match err {
        AiError::Status { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("quota exceeded"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    let result = EfficiencyAnalyzer::new(Arc::new(client(addr)))
        .analyze(&seed::demo_items())
        .await;
    assert!(result.is_fallback());
}

#[tokio::test]
async fn blocked_candidate_is_empty_response() {
    let (addr, _) = spawn_stub(StatusCode::OK, json!({ "candidates": [{ "finishReason": "SAFETY" }] })).await;
    let request = GenerationRequest::for_items(&[]).unwrap();

    let err = client(addr).generate(&request).await.unwrap_err();
    assert!(matches!(err, AiError::EmptyResponse));
}

#[tokio::test]
async fn html_body_with_ok_status_is_malformed_and_falls_back() {
    let app = Router::new().route(
        "/v1beta/models/:model",
        post(|| async { axum::response::Html("<html><body>Service Unavailable</body></html>") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let request = GenerationRequest::for_items(&[]).unwrap();

    let err = client(addr).generate(&request).await.unwrap_err();
    assert!(matches!(err, AiError::MalformedResponse(_)));

    let result = EfficiencyAnalyzer::new(Arc::new(client(addr)))
        .analyze(&seed::demo_items())
        .await;
    assert!(result.is_fallback());
    assert_eq!(result.outcome, AnalysisOutcome::Fallback);
}
