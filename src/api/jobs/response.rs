// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Job API response types

use serde::{Deserialize, Serialize};

use crate::jobs::{JobBoard, JobSummary};

/// Response body for POST /v1/jobs/search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchApiResponse {
    pub jobs: Vec<JobSummary>,
}

/// Response body for GET /v1/jobs/requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementsApiResponse {
    pub requirements: Vec<String>,
}

/// One registered job source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
}

impl SourceInfo {
    /// Display name comes from the board registry when the id is known
    pub fn from_id(id: &str) -> Self {
        let name = id
            .parse::<JobBoard>()
            .map(|board| board.profile().name.to_string())
            .unwrap_or_else(|_| id.to_string());
        Self {
            id: id.to_string(),
            name,
        }
    }
}

/// Response body for GET /v1/jobs/sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesApiResponse {
    pub sources: Vec<SourceInfo>,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sources: Vec<String>,
    pub generative_fallback: bool,
}
