// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for job board searches

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retriever::FetchError;

/// A single job listing scraped from a board's search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    /// Per-result key: source tag, timestamp and ordinal (not stable across runs)
    pub id: String,
    /// Job title
    pub title: String,
    /// Hiring company, empty when the board omits it
    pub company: String,
    /// Location label, empty when the board omits it
    pub location: String,
    /// Absolute URL of the posting
    pub link: String,
    /// Source board id (e.g. "careers24", "indeed")
    pub source: String,
    /// Board's "posted" label if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_label: Option<String>,
}

impl JobSummary {
    /// Build the per-result id for the `ordinal`-th result of a run
    pub fn make_id(source: &str, timestamp_ms: i64, ordinal: usize) -> String {
        format!("{}-{}-{}", source, timestamp_ms, ordinal)
    }
}

/// Errors that can occur during job searches
#[derive(Debug, Error)]
pub enum JobSearchError {
    /// Query was empty or too long
    #[error("Invalid query: {reason}")]
    InvalidQuery {
        /// Reason the query is invalid
        reason: String,
    },

    /// No registered source has this id
    #[error("Unknown job source: {source_id}")]
    UnknownSource {
        /// Requested source id
        source_id: String,
    },

    /// Listing page could not be retrieved
    #[error("Listing fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Source exceeded the search deadline
    #[error("Source {source_id} timed out after {timeout_ms}ms")]
    SourceTimeout {
        /// Source board id
        source_id: String,
        /// Deadline in milliseconds
        timeout_ms: u64,
    },
}
