// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for page retrieval

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fetched HTML page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievedPage {
    /// URL that was requested
    pub url: String,
    /// Raw HTML body
    pub html: String,
    /// URL after following redirects (may equal `url`)
    pub final_url: String,
}

/// Coarse failure classification shared by every pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// DNS failure, refused connection, broken body
    NetworkFailure,
    /// Deadline exceeded
    Timeout,
    /// Non-2xx from the source site
    UpstreamNonOk,
    /// Malformed structured data or unparseable generated output
    ParseFailure,
}

/// Errors that can occur while retrieving a page
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Connection-level failure
    #[error("Network error fetching {url}: {message}")]
    Network {
        /// Requested URL
        url: String,
        /// Underlying error message
        message: String,
    },

    /// Wall-clock budget exceeded
    #[error("Timeout after {timeout_ms}ms fetching {url}")]
    Timeout {
        /// Requested URL
        url: String,
        /// Budget in milliseconds
        timeout_ms: u64,
    },

    /// Source site answered with a non-success status
    #[error("HTTP {status} for {url}")]
    UpstreamNonOk {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// URL points at a local or private address
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Map onto the shared failure taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network { .. } => ErrorKind::NetworkFailure,
            FetchError::Timeout { .. } => ErrorKind::Timeout,
            FetchError::UpstreamNonOk { .. } => ErrorKind::UpstreamNonOk,
            FetchError::UnsafeUrl(_) | FetchError::InvalidUrl(_) => ErrorKind::ParseFailure,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }

    pub(crate) fn from_reqwest(url: &str, timeout_ms: u64, err: reqwest::Error) -> Self {
        if let Some(blocked) = BlockedRedirect::find(&err) {
            FetchError::UnsafeUrl(blocked.0.clone())
        } else if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout_ms,
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Redirect hop refused by the safety gate
#[derive(Debug, Error)]
#[error("Redirect to {0} blocked")]
pub(crate) struct BlockedRedirect(pub String);

impl BlockedRedirect {
    /// Find the refusal in a client error's source chain
    fn find(err: &reqwest::Error) -> Option<&BlockedRedirect> {
        if !err.is_redirect() {
            return None;
        }
        let mut source = std::error::Error::source(err);
        while let Some(inner) = source {
            if let Some(blocked) = inner.downcast_ref::<BlockedRedirect>() {
                return Some(blocked);
            }
            source = inner.source();
        }
        None
    }
}
