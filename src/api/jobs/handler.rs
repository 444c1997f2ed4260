// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Job API endpoint handlers

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{debug, info, warn};

use super::request::{ContentApiRequest, JobSearchApiRequest, RequirementsQuery};
use super::response::{JobSearchApiResponse, RequirementsApiResponse, SourceInfo, SourcesApiResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::content::ContentExtractionResult;

/// POST /v1/jobs/search - Search job boards
///
/// # Request
/// - `query`: Search keywords (required, max 200 chars)
/// - `source`: Optional source id; when given only that board is queried
///
/// # Response
/// - `jobs`: Job summaries in source registration order, links deduplicated
///
/// # Errors
/// - 400 Bad Request: Invalid query or unknown source
pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<JobSearchApiRequest>,
) -> Result<Json<JobSearchApiResponse>, ApiError> {
    debug!("Job search request: {:?} (source: {:?})", request.query, request.source);

    if let Err(e) = request.validate() {
        warn!("Job search validation failed: {}", e);
        return Err(ApiError::InvalidRequest(e));
    }

    let jobs = match request.source.as_deref() {
        Some(source) => state.job_search.search_one(&request.query, source).await?,
        None => state.job_search.search_all(&request.query).await?,
    };

    info!("Job search returned {} jobs for '{}'", jobs.len(), request.query.trim());
    Ok(Json(JobSearchApiResponse { jobs }))
}

/// POST /v1/jobs/content - Extract a posting's main content and apply link
///
/// # Errors
/// - 400 Bad Request: Missing, invalid or disallowed URL
/// - 504 Gateway Timeout: The posting site did not answer in time
/// - 500 Internal Server Error: The posting could not be loaded
pub async fn content_handler(
    State(state): State<AppState>,
    Json(request): Json<ContentApiRequest>,
) -> Result<Json<ContentExtractionResult>, ApiError> {
    request.validate().map_err(ApiError::InvalidRequest)?;

    let result = state.content.resolve(&request.url).await.map_err(|e| {
        warn!("Content extraction failed for {}: {}", request.url, e);
        ApiError::from(e)
    })?;

    Ok(Json(result))
}

/// GET /v1/jobs/requirements?url= - Extract requirement lines
///
/// Always answers 200 for a valid URL; fetch and extraction failures
/// produce the placeholder line.
pub async fn requirements_handler(
    State(state): State<AppState>,
    Query(query): Query<RequirementsQuery>,
) -> Result<Json<RequirementsApiResponse>, ApiError> {
    let url = query.validated_url().map_err(ApiError::InvalidRequest)?;

    let requirements = state.requirements.extract_from_url(url).await;
    debug!("Extracted {} requirement lines from {}", requirements.len(), url);

    Ok(Json(RequirementsApiResponse { requirements }))
}

/// GET /v1/jobs/sources - Registered source ids, for per-source loading
pub async fn sources_handler(State(state): State<AppState>) -> Json<SourcesApiResponse> {
    let sources = state
        .job_search
        .available_sources()
        .into_iter()
        .map(SourceInfo::from_id)
        .collect();
    Json(SourcesApiResponse { sources })
}
