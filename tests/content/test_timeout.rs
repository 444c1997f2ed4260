// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hard wall-clock budgets against a server that never answers

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use fabstir_job_harvester::api::{create_router, ApiError, AppState, ErrorResponse};
use fabstir_job_harvester::config::HarvesterConfig;
use fabstir_job_harvester::retriever::{FetchError, Identity, PageRetriever, RetrieverConfig};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::util::ServiceExt;

/// Accepts connections and holds them open without writing a byte
async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

fn local_config(content_timeout_secs: u64) -> RetrieverConfig {
    RetrieverConfig {
        content_timeout_secs,
        allow_private_hosts: true,
        ..RetrieverConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_stops_at_budget() {
    let addr = silent_server().await;
    let retriever = PageRetriever::new(local_config(15)).unwrap();

    let started = Instant::now();
    let error = retriever
        .fetch(
            &format!("http://{}/job", addr),
            Identity::Stealth,
            Duration::from_millis(300),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, FetchError::Timeout { timeout_ms: 300, .. }));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_timeout_is_not_retried_with_second_identity() {
    let addr = silent_server().await;
    let retriever = PageRetriever::new(local_config(15)).unwrap();

    let started = Instant::now();
    let error = retriever
        .fetch_with_fallback(&format!("http://{}/job", addr), Duration::from_millis(400))
        .await
        .unwrap_err();

    assert!(error.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_content_endpoint_answers_504_on_timeout() {
    let addr = silent_server().await;

    let mut config = HarvesterConfig::default();
    config.retriever = local_config(1);
    let app = create_router(AppState::from_config(&config).unwrap());

    let body = serde_json::json!({ "url": format!("http://{}/job", addr) });
    let started = Instant::now();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/jobs/content")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert!(started.elapsed() < Duration::from_secs(5));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error.status, 504);
    assert!(error.error.contains("original site"));
}

#[tokio::test]
async fn test_requirements_endpoint_answers_placeholder_on_timeout() {
    let addr = silent_server().await;

    let mut config = HarvesterConfig::default();
    config.retriever = local_config(1);
    let app = create_router(AppState::from_config(&config).unwrap());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/jobs/requirements?url=http://{}/job", addr))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let requirements = json["requirements"].as_array().unwrap();
    assert_eq!(requirements.len(), 1);
    assert!(requirements[0]
        .as_str()
        .unwrap()
        .starts_with("Could not extract specific requirements"));
}

#[test]
fn test_timeout_error_maps_to_gateway_timeout() {
    let error = ApiError::from(FetchError::Timeout {
        url: "https://slow.example/job".to_string(),
        timeout_ms: 15000,
    });
    assert_eq!(error.status_code(), 504);
}
