// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Job API request types

use serde::{Deserialize, Serialize};

use crate::jobs::service::MAX_QUERY_CHARS;

/// Request body for POST /v1/jobs/search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchApiRequest {
    /// Search keywords (required, max 200 chars)
    pub query: String,

    /// Run only this source; all sources when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl JobSearchApiRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("Query cannot be empty".to_string());
        }
        if self.query.trim().chars().count() > MAX_QUERY_CHARS {
            return Err(format!(
                "Query too long (max {} characters)",
                MAX_QUERY_CHARS
            ));
        }
        if let Some(source) = &self.source {
            if source.trim().is_empty() {
                return Err("source cannot be blank".to_string());
            }
        }
        Ok(())
    }
}

/// Request body for POST /v1/jobs/content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentApiRequest {
    pub url: String,
}

impl ContentApiRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_url(&self.url)
    }
}

/// Query string for GET /v1/jobs/requirements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementsQuery {
    #[serde(default)]
    pub url: Option<String>,
}

impl RequirementsQuery {
    /// The trimmed URL, or a validation message
    pub fn validated_url(&self) -> Result<&str, String> {
        let url = self.url.as_deref().unwrap_or_default().trim();
        validate_url(url)?;
        Ok(url)
    }
}

fn validate_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("url is required".to_string());
    }
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(_) => Err(format!("url must be http or https: {}", url)),
        Err(e) => Err(format!("invalid url '{}': {}", url, e)),
    }
}
