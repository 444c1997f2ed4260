// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Apply-link resolution
//!
//! Finds the employer's own application URL for a posting page.

use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::candidates;
use super::config::{is_login_url, same_site, ApplyLinkConfig};
use crate::retriever::RedirectProbe;

/// Resolves canonical employer application URLs
pub struct ApplyLinkResolver {
    config: ApplyLinkConfig,
    probe: Arc<dyn RedirectProbe>,
}

impl ApplyLinkResolver {
    pub fn new(config: ApplyLinkConfig, probe: Arc<dyn RedirectProbe>) -> Self {
        Self { config, probe }
    }

    /// Resolve the direct apply URL for a posting page
    ///
    /// Structured data first, then anchors; a candidate on a secondary
    /// aggregator or short-link host is chased to its landing page. When
    /// neither finds anything, a board-specific inline-script pattern is
    /// tried. Returns `None` when no first-party candidate survives, and
    /// the caller falls back to the posting URL.
    pub async fn resolve_apply_url(&self, html: &str, page_url: &str) -> Option<String> {
        let page = Url::parse(page_url).ok()?;

        let resolved = match self.find_candidate(html, &page) {
            Some(candidate) => Some(self.canonicalize(&candidate).await),
            None => candidates::from_inline_script(html, &page, &self.config),
        };

        let resolved = resolved.filter(|url| !is_login_url(url) && !same_site(url, page.as_str()));
        match &resolved {
            Some(url) => info!("Resolved apply URL for {}: {}", page_url, url),
            None => debug!("No direct apply URL found for {}", page_url),
        }
        resolved
    }

    /// Structured data, then anchor heuristics
    fn find_candidate(&self, html: &str, page: &Url) -> Option<String> {
        let document = Html::parse_document(html);

        if let Some(candidate) = candidates::from_structured_data(&document, page, &self.config) {
            debug!("Apply candidate from structured data: {}", candidate);
            return Some(candidate);
        }

        let candidate = candidates::from_anchors(&document, page, &self.config);
        if let Some(ref c) = candidate {
            debug!("Apply candidate from anchors: {}", c);
        }
        candidate
    }

    /// Follow a secondary-aggregator or short link to its landing page
    ///
    /// Any URL outside the redirect-chase set is returned unchanged without
    /// a request. Probe failures keep the original candidate.
    pub async fn canonicalize(&self, candidate: &str) -> String {
        if !self.config.is_redirect_domain(candidate) {
            return candidate.to_string();
        }

        match self.probe.final_url(candidate).await {
            Ok(landing)
                if landing != candidate
                    && !self.config.is_aggregator(&landing)
                    && !self.config.is_redirect_domain(&landing)
                    && !is_login_url(&landing) =>
            {
                debug!("Redirect chase {} -> {}", candidate, landing);
                landing
            }
            Ok(landing) => {
                debug!("Redirect chase for {} landed on {}, keeping original", candidate, landing);
                candidate.to_string()
            }
            Err(e) => {
                debug!("Redirect chase failed for {}: {}", candidate, e);
                candidate.to_string()
            }
        }
    }

    pub fn config(&self) -> &ApplyLinkConfig {
        &self.config
    }
}
