// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Job source trait and the board-backed implementation

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::boards::JobBoard;
use super::parser::parse_listing;
use super::types::{JobSearchError, JobSummary};
use crate::retriever::PageRetriever;

/// Trait for implementing job sources
///
/// A source turns a search query into job summaries from one site.
/// Errors are returned rather than swallowed; the orchestrator decides
/// how a failed source degrades.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Source id used for `searchOne` and as the summary source tag
    fn id(&self) -> &'static str;

    /// Search this source
    async fn search(&self, query: &str) -> Result<Vec<JobSummary>, JobSearchError>;
}

/// Adapter that scrapes one job board's search results page
pub struct BoardAdapter {
    board: JobBoard,
    retriever: Arc<PageRetriever>,
    cap: usize,
    title_max_chars: usize,
}

impl BoardAdapter {
    pub fn new(
        board: JobBoard,
        retriever: Arc<PageRetriever>,
        cap: usize,
        title_max_chars: usize,
    ) -> Self {
        Self {
            board,
            retriever,
            cap,
            title_max_chars,
        }
    }

    pub fn board(&self) -> JobBoard {
        self.board
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Search URL for a query on this board
    pub fn query_url(&self, query: &str) -> String {
        self.board.profile().search_url(query)
    }
}

#[async_trait]
impl JobSource for BoardAdapter {
    fn id(&self) -> &'static str {
        self.board.as_str()
    }

    async fn search(&self, query: &str) -> Result<Vec<JobSummary>, JobSearchError> {
        let url = self.query_url(query);
        debug!("Searching {} via {}", self.board, url);

        // Stealth identity only; a failed listing fetch is this source's failure
        let page = self.retriever.fetch_listing(&url).await?;

        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        Ok(parse_listing(
            self.board.profile(),
            &page.html,
            self.cap,
            self.title_max_chars,
            timestamp_ms,
        ))
    }
}
