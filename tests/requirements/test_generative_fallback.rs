// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generative fallback for low-yield pages

use async_trait::async_trait;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use fabstir_job_harvester::llm::{GenerativeConfig, GenerativeTextClient, LlmError, TextGenerator};
use fabstir_job_harvester::requirements::{RequirementsConfig, RequirementsExtractor};
use fabstir_job_harvester::retriever::{PageRetriever, RetrieverConfig};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const LOW_YIELD_POSTING: &str = r#"
<html><body>
  <div class="v-descrip">
    <p>We need a delivery driver for our Pinetown depot.</p>
    <ul>
      <li>Valid code 10 driver's licence</li>
      <li>Own reliable transport</li>
    </ul>
  </div>
</body></html>
"#;

const RICH_POSTING: &str = r#"
<html><body>
  <h3>Requirements:</h3>
  <ul>
    <li>Matric certificate</li>
    <li>Three years warehouse experience</li>
    <li>Forklift licence</li>
  </ul>
  <h3>Duties</h3>
  <ul>
    <li>Load and offload delivery vehicles</li>
    <li>Keep stock records up to date</li>
  </ul>
</body></html>
"#;

/// Canned generator that records how it was called
struct StubGenerator {
    reply: Option<String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubGenerator {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn extractor_with(generator: Arc<StubGenerator>) -> RequirementsExtractor {
    let retriever = Arc::new(PageRetriever::new(RetrieverConfig::default()).unwrap());
    RequirementsExtractor::new(retriever, Some(generator), RequirementsConfig::default())
}

#[tokio::test]
async fn test_low_yield_replaced_and_capped() {
    let items: Vec<String> = (0..25).map(|i| format!("Generated requirement {}", i)).collect();
    let reply = format!("```json\n{}\n```", serde_json::to_string(&items).unwrap());
    let generator = StubGenerator::replying(&reply);
    let extractor = extractor_with(generator.clone());

    let result = extractor.extract(LOW_YIELD_POSTING).await;

    assert_eq!(generator.calls(), 1);
    assert_eq!(result.len(), 20);
    assert_eq!(result[0], "Generated requirement 0");

    let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Pinetown depot"));
    assert!(prompt.contains("Own reliable transport"));
}

#[tokio::test]
async fn test_generated_items_are_cleaned() {
    let generator = StubGenerator::replying(
        r#"Here you go: ["Matric", "Matric", "Share this job on Facebook", "Hi", "  Forklift licence  "]"#,
    );
    let result = extractor_with(generator).extract(LOW_YIELD_POSTING).await;
    assert_eq!(result, vec!["Matric", "Forklift licence"]);
}

#[tokio::test]
async fn test_generator_failure_keeps_heuristic() {
    let generator = StubGenerator::failing();
    let result = extractor_with(generator.clone()).extract(LOW_YIELD_POSTING).await;

    assert_eq!(generator.calls(), 1);
    assert_eq!(result, vec!["Valid code 10 driver's licence", "Own reliable transport"]);
}

#[tokio::test]
async fn test_unusable_reply_keeps_heuristic() {
    for reply in ["Sorry, I cannot help with that.", "[]", "[1, 2, 3]"] {
        let result = extractor_with(StubGenerator::replying(reply))
            .extract(LOW_YIELD_POSTING)
            .await;
        assert_eq!(result.len(), 2, "reply {:?}", reply);
    }
}

#[tokio::test]
async fn test_sufficient_yield_skips_generator() {
    let generator = StubGenerator::replying(r#"["Should not be used"]"#);
    let result = extractor_with(generator.clone()).extract(RICH_POSTING).await;

    assert_eq!(generator.calls(), 0);
    assert_eq!(result[0], "SECTION: [REQUIRED] Requirements:");
    assert!(result.contains(&"SECTION: [DUTIES] Duties".to_string()));
}

#[tokio::test]
async fn test_failure_on_empty_page_yields_placeholder() {
    let result = extractor_with(StubGenerator::failing())
        .extract("<html><body><p>Apply now</p></body></html>")
        .await;
    assert_eq!(result.len(), 1);
    assert!(result[0].starts_with("Could not extract specific requirements"));
}

async fn chat_completions(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer test-key");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "missing key").into_response();
    }
    if body["messages"][0]["role"] != "system" || body["temperature"] != json!(0.0) {
        return (StatusCode::BAD_REQUEST, "unexpected body").into_response();
    }

    Json(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "[\"Matric certificate\", \"Two years delivery experience\"]"
            }
        }]
    }))
    .into_response()
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client_config(addr: SocketAddr, key: &str) -> GenerativeConfig {
    GenerativeConfig {
        api_key: Some(key.to_string()),
        api_url: format!("http://{}/", addr),
        ..GenerativeConfig::default()
    }
}

#[tokio::test]
async fn test_client_against_chat_endpoint() {
    let addr = serve(Router::new().route("/v1/chat/completions", post(chat_completions))).await;
    let client = GenerativeTextClient::new(&client_config(addr, "test-key")).unwrap();

    let items = client.complete_json_list("system", "posting").await.unwrap();
    assert_eq!(items, vec!["Matric certificate", "Two years delivery experience"]);
    assert_eq!(client.model_name(), "gpt-4o-mini");
}

#[tokio::test]
async fn test_client_surfaces_api_status() {
    let addr = serve(Router::new().route("/v1/chat/completions", post(chat_completions))).await;
    let client = GenerativeTextClient::new(&client_config(addr, "wrong-key")).unwrap();

    let error = client.complete("system", "posting").await.unwrap_err();
    assert!(matches!(error, LlmError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_extractor_with_real_client() {
    let addr = serve(Router::new().route("/v1/chat/completions", post(chat_completions))).await;
    let client = GenerativeTextClient::new(&client_config(addr, "test-key")).unwrap();

    let retriever = Arc::new(PageRetriever::new(RetrieverConfig::default()).unwrap());
    let extractor =
        RequirementsExtractor::new(retriever, Some(Arc::new(client)), RequirementsConfig::default());

    assert!(extractor.has_generative_fallback());
    let items = extractor.extract(LOW_YIELD_POSTING).await;
    assert_eq!(items, vec!["Matric certificate", "Two years delivery experience"]);
}

#[test]
fn test_client_requires_key() {
    let result = GenerativeTextClient::new(&GenerativeConfig::default());
    assert!(matches!(result, Err(LlmError::NotConfigured)));
}
