// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Redirect hops pass the same gate as the first request

use axum::{response::Redirect, routing::get, Router};
use fabstir_job_harvester::retriever::{FetchError, PageRetriever, RedirectProbe, RetrieverConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;

async fn redirecting_server() -> SocketAddr {
    let router = Router::new()
        .route("/job", get(|| async { "<html><body><p>Posting</p></body></html>" }))
        .route("/moved", get(|| async { Redirect::temporary("/job") }))
        .route(
            "/escape",
            get(|| async { Redirect::temporary("ftp://files.example/job") }),
        )
        .route("/loop", get(|| async { Redirect::temporary("/loop") }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn local_retriever() -> PageRetriever {
    PageRetriever::new(RetrieverConfig {
        allow_private_hosts: true,
        max_redirects: 3,
        ..RetrieverConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_same_site_redirect_followed() {
    let addr = redirecting_server().await;
    let page = local_retriever()
        .fetch_content_page(&format!("http://{}/moved", addr))
        .await
        .unwrap();

    assert_eq!(page.final_url, format!("http://{}/job", addr));
    assert!(page.html.contains("Posting"));
}

#[tokio::test]
async fn test_redirect_off_http_is_blocked() {
    let addr = redirecting_server().await;
    let error = local_retriever()
        .fetch_content_page(&format!("http://{}/escape", addr))
        .await
        .unwrap_err();

    match error {
        FetchError::UnsafeUrl(url) => assert_eq!(url, "ftp://files.example/job"),
        other => panic!("expected UnsafeUrl, got {:?}", other),
    }
}

#[tokio::test]
async fn test_probe_refuses_blocked_hop() {
    let addr = redirecting_server().await;
    let result = local_retriever()
        .final_url(&format!("http://{}/escape", addr))
        .await;
    assert!(matches!(result, Err(FetchError::UnsafeUrl(_))));
}

#[tokio::test]
async fn test_redirect_loop_is_network_error() {
    let addr = redirecting_server().await;
    let error = local_retriever()
        .fetch_content_page(&format!("http://{}/loop", addr))
        .await
        .unwrap_err();
    assert!(matches!(error, FetchError::Network { .. }));
}
