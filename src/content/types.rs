// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Types for posting content extraction

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retriever::{ErrorKind, FetchError};

/// Main content of one posting page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentExtractionResult {
    /// Posting URL as requested
    pub url: String,
    /// Cleaned HTML fragment of the description body
    pub content: String,
    /// First-party application URL, if one was found
    pub direct_apply_url: Option<String>,
}

/// Errors that can occur while resolving posting content
#[derive(Debug, Error)]
pub enum ContentError {
    /// URL missing or unparseable
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Both retrieval identities failed, or the budget ran out
    #[error("Could not retrieve page: {0}")]
    Fetch(#[from] FetchError),
}

impl ContentError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ContentError::Fetch(e) if e.is_timeout())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::InvalidUrl(_) => ErrorKind::ParseFailure,
            ContentError::Fetch(e) => e.kind(),
        }
    }
}
