// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content resolution for a single posting URL

use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use super::config::ContentConfig;
use super::extractor::extract_content;
use super::types::{ContentError, ContentExtractionResult};
use crate::apply_link::ApplyLinkResolver;
use crate::retriever::PageRetriever;

/// Fetches a posting page and returns its description plus apply link
pub struct ContentResolver {
    retriever: Arc<PageRetriever>,
    apply_links: Arc<ApplyLinkResolver>,
    config: ContentConfig,
}

impl ContentResolver {
    pub fn new(
        retriever: Arc<PageRetriever>,
        apply_links: Arc<ApplyLinkResolver>,
        config: ContentConfig,
    ) -> Self {
        Self {
            retriever,
            apply_links,
            config,
        }
    }

    /// Retrieve and extract the main content of a posting
    ///
    /// The apply link is resolved from the raw page before any cleanup,
    /// since structured data and inline scripts are stripped afterwards.
    pub async fn resolve(&self, url: &str) -> Result<ContentExtractionResult, ContentError> {
        let url = url.trim();
        if Url::parse(url).is_err() {
            return Err(ContentError::InvalidUrl(url.to_string()));
        }

        let page = self.retriever.fetch_content_page(url).await.map_err(|e| {
            warn!("Content fetch failed for {}: {}", url, e);
            ContentError::from(e)
        })?;

        let direct_apply_url = self
            .apply_links
            .resolve_apply_url(&page.html, &page.final_url)
            .await;

        let content = extract_content(&page.html, &page.final_url, &self.config);
        info!(
            "Extracted {} chars of content from {} (direct apply: {})",
            content.len(),
            url,
            direct_apply_url.is_some()
        );

        Ok(ContentExtractionResult {
            url: url.to_string(),
            content,
            direct_apply_url,
        })
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }
}
