// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for requirement extraction

use std::env;

/// Thresholds and caps for the heuristic and generative passes
#[derive(Debug, Clone)]
pub struct RequirementsConfig {
    /// Below this many items the fallbacks run (default: 6)
    pub min_yield: usize,
    /// Cap on heuristic output (default: 30)
    pub max_items: usize,
    /// Cap on generative output (default: 20)
    pub llm_max_items: usize,
    /// Plain-text excerpt length sent to the generative service (default: 5000)
    pub llm_excerpt_chars: usize,
    /// Siblings read after each section heading (default: 20)
    pub section_walk_limit: usize,
}

impl RequirementsConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_yield: env_usize("REQUIREMENTS_MIN_YIELD", defaults.min_yield),
            max_items: env_usize("REQUIREMENTS_MAX_ITEMS", defaults.max_items),
            llm_max_items: env_usize("REQUIREMENTS_LLM_MAX_ITEMS", defaults.llm_max_items),
            llm_excerpt_chars: env_usize("REQUIREMENTS_LLM_EXCERPT_CHARS", defaults.llm_excerpt_chars),
            section_walk_limit: env_usize(
                "REQUIREMENTS_SECTION_WALK_LIMIT",
                defaults.section_walk_limit,
            ),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.min_yield == 0 {
            return Err("REQUIREMENTS_MIN_YIELD must be at least 1".to_string());
        }
        if self.max_items == 0 || self.llm_max_items == 0 {
            return Err("requirement caps must be at least 1".to_string());
        }
        if self.llm_excerpt_chars < 100 {
            return Err("REQUIREMENTS_LLM_EXCERPT_CHARS must be at least 100".to_string());
        }
        if self.section_walk_limit == 0 {
            return Err("REQUIREMENTS_SECTION_WALK_LIMIT must be at least 1".to_string());
        }
        Ok(())
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for RequirementsConfig {
    fn default() -> Self {
        Self {
            min_yield: 6,
            max_items: 30,
            llm_max_items: 20,
            llm_excerpt_chars: 5000,
            section_walk_limit: 20,
        }
    }
}
