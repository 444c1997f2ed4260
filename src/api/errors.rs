// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::ContentError;
use crate::jobs::JobSearchError;
use crate::retriever::FetchError;

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest(String),
    /// The posting site did not answer within the budget
    Timeout(String),
    /// The posting site failed or refused the request
    UpstreamFailure(String),
    InternalError(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::Timeout(_) => 504,
            ApiError::UpstreamFailure(_) | ApiError::InternalError(_) => 500,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            ApiError::InvalidRequest(msg)
            | ApiError::Timeout(msg)
            | ApiError::UpstreamFailure(msg)
            | ApiError::InternalError(msg) => msg.clone(),
        };

        ErrorResponse {
            error,
            status: self.status_code(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            ApiError::UpstreamFailure(msg) => write!(f, "Upstream failure: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Timeout { .. } => ApiError::Timeout(
                "The posting took too long to load. Try viewing it on the original site."
                    .to_string(),
            ),
            FetchError::UnsafeUrl(url) => {
                ApiError::InvalidRequest(format!("URL is not allowed: {}", url))
            }
            FetchError::InvalidUrl(url) => ApiError::InvalidRequest(format!("Invalid URL: {}", url)),
            FetchError::Network { .. } | FetchError::UpstreamNonOk { .. } => {
                ApiError::UpstreamFailure(
                    "Could not load this posting. The site may be blocking previews.".to_string(),
                )
            }
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::InvalidUrl(url) => ApiError::InvalidRequest(format!("Invalid URL: {}", url)),
            ContentError::Fetch(fetch) => ApiError::from(fetch),
        }
    }
}

impl From<JobSearchError> for ApiError {
    fn from(e: JobSearchError) -> Self {
        match e {
            JobSearchError::InvalidQuery { .. } | JobSearchError::UnknownSource { .. } => {
                ApiError::InvalidRequest(e.to_string())
            }
            JobSearchError::SourceTimeout { .. } => ApiError::Timeout(e.to_string()),
            JobSearchError::Fetch(fetch) => ApiError::from(fetch),
        }
    }
}
