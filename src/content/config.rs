// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for main-content selection

use std::env;

/// Thresholds used when picking the description block
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// A selector's best match must exceed this many characters of markup (default: 500)
    pub min_content_chars: usize,
    /// Fallback paragraphs must exceed this many characters of text (default: 100)
    pub min_fragment_chars: usize,
}

impl ContentConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            min_content_chars: env::var("CONTENT_MIN_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            min_fragment_chars: env::var("CONTENT_MIN_FRAGMENT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.min_content_chars == 0 {
            return Err("min_content_chars must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            min_content_chars: 500,
            min_fragment_chars: 100,
        }
    }
}
