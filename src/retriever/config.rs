// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for page retrieval
//!
//! Defines timeouts for content pages and redirect probes.

use std::env;
use std::time::Duration;

/// Configuration for the HTML retriever
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Budget for content pages and board listings in seconds (default: 15)
    pub content_timeout_secs: u64,
    /// Budget for redirect-resolution probes in seconds (default: 7)
    pub probe_timeout_secs: u64,
    /// Maximum redirects followed per request (default: 10)
    pub max_redirects: usize,
    /// Allow fetching localhost/private addresses (default: false)
    pub allow_private_hosts: bool,
}

impl RetrieverConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            content_timeout_secs: env::var("FETCH_CONTENT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            probe_timeout_secs: env::var("FETCH_PROBE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            max_redirects: env::var("FETCH_MAX_REDIRECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            allow_private_hosts: env::var("FETCH_ALLOW_PRIVATE_HOSTS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.content_timeout_secs == 0 {
            return Err("content_timeout_secs must be at least 1".to_string());
        }
        if self.probe_timeout_secs == 0 {
            return Err("probe_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_secs(self.content_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            content_timeout_secs: 15,
            probe_timeout_secs: 7,
            max_redirects: 10,
            allow_private_hosts: false,
        }
    }
}
