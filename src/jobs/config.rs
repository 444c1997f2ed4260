// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for job board searches

use std::collections::HashMap;
use std::env;
use std::time::Duration;
use tracing::warn;

use super::boards::JobBoard;

/// Configuration for the fetch orchestrator and its adapters
#[derive(Debug, Clone)]
pub struct JobSearchConfig {
    /// Registered boards, in registration order
    pub sources: Vec<JobBoard>,
    /// Deadline for a single source's fetch and parse, in seconds
    pub deadline_secs: u64,
    /// Titles with this many characters or more are treated as mis-selected
    pub title_max_chars: usize,
    /// Per-board result cap overrides
    pub caps: HashMap<JobBoard, usize>,
}

impl JobSearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let sources = match env::var("JOB_SOURCES") {
            Ok(list) => parse_sources(&list),
            Err(_) => JobBoard::ALL.to_vec(),
        };

        let caps = JobBoard::ALL
            .iter()
            .filter_map(|board| {
                let key = format!("JOB_SOURCE_CAP_{}", board.as_str().to_uppercase());
                env::var(&key)
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .map(|cap| (*board, cap))
            })
            .collect();

        Self {
            sources,
            deadline_secs: env::var("JOB_SEARCH_DEADLINE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            title_max_chars: env::var("JOB_TITLE_MAX_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(150),
            caps,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.sources.is_empty() {
            return Err("at least one job source must be enabled".to_string());
        }
        if self.deadline_secs == 0 {
            return Err("deadline_secs must be at least 1".to_string());
        }
        if self.title_max_chars == 0 {
            return Err("title_max_chars must be at least 1".to_string());
        }
        if let Some((board, _)) = self.caps.iter().find(|(_, cap)| **cap == 0) {
            return Err(format!("result cap for {} must be at least 1", board));
        }
        Ok(())
    }

    /// Result cap for a board (override or the board's default)
    pub fn cap_for(&self, board: JobBoard) -> usize {
        self.caps
            .get(&board)
            .copied()
            .unwrap_or(board.profile().default_cap)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

fn parse_sources(list: &str) -> Vec<JobBoard> {
    let mut sources = Vec::new();
    for id in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match id.parse::<JobBoard>() {
            Ok(board) if !sources.contains(&board) => sources.push(board),
            Ok(_) => {}
            Err(e) => warn!("Ignoring JOB_SOURCES entry: {}", e),
        }
    }
    sources
}

impl Default for JobSearchConfig {
    fn default() -> Self {
        Self {
            sources: JobBoard::ALL.to_vec(),
            deadline_secs: 20,
            title_max_chars: 150,
            caps: HashMap::new(),
        }
    }
}
