// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fetch orchestration across job sources
//!
//! Runs sources concurrently, isolates per-source failures and merges
//! partial results in registration order.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::config::JobSearchConfig;
use super::provider::{BoardAdapter, JobSource};
use super::types::{JobSearchError, JobSummary};
use crate::retriever::PageRetriever;

pub const MAX_QUERY_CHARS: usize = 200;

/// Orchestrates job searches over the registered sources
pub struct JobSearchService {
    sources: Vec<Box<dyn JobSource>>,
    deadline: Duration,
}

impl JobSearchService {
    /// Create a service with one board adapter per configured source
    pub fn new(config: &JobSearchConfig, retriever: Arc<PageRetriever>) -> Self {
        let sources: Vec<Box<dyn JobSource>> = config
            .sources
            .iter()
            .map(|board| {
                debug!("Job source enabled: {} (cap {})", board, config.cap_for(*board));
                Box::new(BoardAdapter::new(
                    *board,
                    retriever.clone(),
                    config.cap_for(*board),
                    config.title_max_chars,
                )) as Box<dyn JobSource>
            })
            .collect();

        Self::with_sources(sources, config.deadline())
    }

    /// Create a service over an explicit source list
    pub fn with_sources(sources: Vec<Box<dyn JobSource>>, deadline: Duration) -> Self {
        Self { sources, deadline }
    }

    /// Search every registered source concurrently
    ///
    /// A failing or slow source contributes nothing; it never empties or
    /// blocks the aggregate. Results keep registration order, and a link
    /// already returned by an earlier source is not repeated.
    pub async fn search_all(&self, query: &str) -> Result<Vec<JobSummary>, JobSearchError> {
        let query = validate_query(query)?;
        let start = Instant::now();

        let futures: Vec<_> = self
            .sources
            .iter()
            .map(|source| self.settle(source.as_ref(), query))
            .collect();
        let per_source = futures::future::join_all(futures).await;

        let mut seen_links = HashSet::new();
        let jobs: Vec<JobSummary> = per_source
            .into_iter()
            .flatten()
            .filter(|job| seen_links.insert(job.link.clone()))
            .collect();

        info!(
            "Job search complete: {} results for '{}' from {} sources in {}ms",
            jobs.len(),
            query,
            self.sources.len(),
            start.elapsed().as_millis()
        );

        Ok(jobs)
    }

    /// Search a single source, for incremental client-driven loading
    pub async fn search_one(
        &self,
        query: &str,
        source_id: &str,
    ) -> Result<Vec<JobSummary>, JobSearchError> {
        let query = validate_query(query)?;
        let wanted = source_id.trim().to_lowercase();

        let source = self
            .sources
            .iter()
            .find(|s| s.id() == wanted)
            .ok_or_else(|| JobSearchError::UnknownSource {
                source_id: source_id.to_string(),
            })?;

        Ok(self.settle(source.as_ref(), query).await)
    }

    /// Run one source under the deadline, mapping any failure to no results
    async fn settle(&self, source: &dyn JobSource, query: &str) -> Vec<JobSummary> {
        let outcome = match tokio::time::timeout(self.deadline, source.search(query)).await {
            Ok(result) => result,
            Err(_) => Err(JobSearchError::SourceTimeout {
                source_id: source.id().to_string(),
                timeout_ms: self.deadline.as_millis() as u64,
            }),
        };

        match outcome {
            Ok(jobs) => {
                debug!("Source {} returned {} jobs", source.id(), jobs.len());
                jobs
            }
            Err(e) => {
                warn!("Job source {} failed: {}", source.id(), e);
                Vec::new()
            }
        }
    }

    /// Ids of the registered sources, in registration order
    pub fn available_sources(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.id()).collect()
    }
}

/// Trim and bound a search query
pub fn validate_query(query: &str) -> Result<&str, JobSearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(JobSearchError::InvalidQuery {
            reason: "Query cannot be empty".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_QUERY_CHARS {
        return Err(JobSearchError::InvalidQuery {
            reason: format!("Query too long (max {} characters)", MAX_QUERY_CHARS),
        });
    }
    Ok(trimmed)
}
