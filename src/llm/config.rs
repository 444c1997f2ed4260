// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generative text service configuration

use std::env;
use std::time::Duration;

/// Connection settings for an OpenAI-compatible chat completion service
#[derive(Clone)]
pub struct GenerativeConfig {
    /// Bearer token; the fallback is disabled when unset
    pub api_key: Option<String>,
    /// Base URL without the `/v1/...` path (default: https://api.openai.com)
    pub api_url: String,
    /// Model name (default: gpt-4o-mini)
    pub model: String,
    /// Per-call timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Maximum completion tokens (default: 800)
    pub max_tokens: u32,
}

impl GenerativeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("GENERATIVE_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            api_url: env::var("GENERATIVE_API_URL").unwrap_or(defaults.api_url),
            model: env::var("GENERATIVE_MODEL").unwrap_or(defaults.model),
            timeout_secs: env::var("GENERATIVE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_tokens: env::var("GENERATIVE_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("GENERATIVE_MODEL must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("GENERATIVE_TIMEOUT_SECS must be at least 1".to_string());
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(format!("GENERATIVE_API_URL must be http(s): {}", self.api_url));
        }
        Ok(())
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
            max_tokens: 800,
        }
    }
}

// Keeps the key out of logs
impl std::fmt::Debug for GenerativeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
