// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::jobs::{
    content_handler, requirements_handler, search_handler, sources_handler, HealthResponse,
};
use crate::apply_link::ApplyLinkResolver;
use crate::config::{HarvesterConfig, ServerConfig};
use crate::content::ContentResolver;
use crate::jobs::JobSearchService;
use crate::llm::{GenerativeTextClient, TextGenerator};
use crate::requirements::RequirementsExtractor;
use crate::retriever::PageRetriever;
use crate::version;

/// Shared services for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub job_search: Arc<JobSearchService>,
    pub content: Arc<ContentResolver>,
    pub requirements: Arc<RequirementsExtractor>,
}

impl AppState {
    /// Wire every component from configuration
    ///
    /// The generative fallback is enabled only when an API key is set.
    pub fn from_config(config: &HarvesterConfig) -> Result<Self> {
        let retriever = Arc::new(PageRetriever::new(config.retriever.clone())?);

        let apply_links = Arc::new(ApplyLinkResolver::new(
            config.apply_links.clone(),
            retriever.clone(),
        ));

        let generator: Option<Arc<dyn TextGenerator>> = if config.generative.is_enabled() {
            Some(Arc::new(GenerativeTextClient::new(&config.generative)?))
        } else {
            info!("GENERATIVE_API_KEY not set, requirements fallback disabled");
            None
        };

        Ok(Self {
            job_search: Arc::new(JobSearchService::new(&config.jobs, retriever.clone())),
            content: Arc::new(ContentResolver::new(
                retriever.clone(),
                apply_links,
                config.content.clone(),
            )),
            requirements: Arc::new(RequirementsExtractor::new(
                retriever,
                generator,
                config.requirements.clone(),
            )),
        })
    }
}

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/version", get(version_handler))
        .route("/v1/jobs/search", post(search_handler))
        .route("/v1/jobs/sources", get(sources_handler))
        .route("/v1/jobs/content", post(content_handler))
        .route("/v1/jobs/requirements", get(requirements_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(server: &ServerConfig, state: AppState) -> Result<()> {
    let addr = server
        .socket_addr()
        .map_err(|e| anyhow::anyhow!(e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

async fn version_handler() -> Json<serde_json::Value> {
    Json(version::get_version_info())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        sources: state
            .job_search
            .available_sources()
            .into_iter()
            .map(str::to_string)
            .collect(),
        generative_fallback: state.requirements.has_generative_fallback(),
    })
}
