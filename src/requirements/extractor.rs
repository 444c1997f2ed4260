// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Requirement extraction
//!
//! Heuristic passes in order:
//! 1. Heading-anchored sections (marker line followed by its bullets)
//! 2. Lines mentioning the mandatory school-leaving credential
//! 3. Site requirement selectors, only when 1 and 2 yield too little
//!
//! When the heuristic yield is still low and a generative service is
//! configured, a plain-text excerpt is sent to it and its list replaces the
//! heuristic result. Nothing here returns an error; the worst case is the
//! single placeholder line.

use scraper::{ElementRef, Html};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::config::RequirementsConfig;
use super::keywords;
use super::sections::{self, Section, MIN_LINE_CHARS};
use crate::content::cleaner;
use crate::dom;
use crate::jobs::JobBoard;
use crate::llm::TextGenerator;
use crate::retriever::PageRetriever;

pub const PLACEHOLDER: &str =
    "Could not extract specific requirements from this posting. Please review the original listing.";

/// Mandatory-keyword and fallback lines must be shorter than this
const MAX_LINE_CHARS: usize = 500;
/// Final items must be longer than this
const MIN_ITEM_CHARS: usize = 5;

const GENERIC_FALLBACK_SELECTORS: &[&str] = &[
    "[itemprop='qualifications']",
    "[itemprop='responsibilities']",
    "[itemprop='skills']",
    ".job-description li",
    ".job-details li",
    ".vacancy-description li",
];

const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "head", "title"];
/// Inline wrappers never count as the capturing element
const INLINE_TAGS: &[&str] = &[
    "strong", "b", "em", "i", "u", "span", "a", "small", "font", "mark", "sup", "sub",
];

const SYSTEM_PROMPT: &str = "You extract requirements from job postings. Reply with only a JSON array of strings: one short entry per qualification, skill, experience requirement or duty. No commentary.";

/// Run the heuristic passes only
///
/// Deduplicated in discovery order, trash-filtered, capped at
/// `config.max_items`. May be empty. A section marker is emitted only
/// together with at least one of its own lines, so the result never ends
/// on a marker.
pub fn extract_heuristic(html: &str, config: &RequirementsConfig) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut found = Collected::new(config.max_items);

    for section in sections::extract_sections(&document, config.section_walk_limit) {
        found.push_section(&section);
    }
    found.push_lines(mandatory_lines(&document));

    if found.len() >= config.min_yield {
        return found.into_items();
    }

    debug!(
        "Heuristic yield {} below {}, scanning site selectors",
        found.len(),
        config.min_yield
    );
    found.push_lines(site_fallback_lines(&document));
    found.into_items()
}

/// Capped output with dedupe over requirement lines
///
/// Markers are exempt from dedupe so a repeated heading still introduces
/// its own lines.
struct Collected {
    items: Vec<String>,
    seen: HashSet<String>,
    cap: usize,
}

impl Collected {
    fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn remaining(&self) -> usize {
        self.cap.saturating_sub(self.items.len())
    }

    fn push_section(&mut self, section: &Section) {
        let marker = section.marker();
        if keywords::is_trash(&marker) || self.remaining() < 2 {
            return;
        }

        let mut local = HashSet::new();
        let lines: Vec<String> = section
            .lines
            .iter()
            .filter_map(|line| usable(line))
            .filter(|line| !self.seen.contains(line) && local.insert(line.clone()))
            .take(self.remaining() - 1)
            .collect();
        if lines.is_empty() {
            return;
        }

        self.items.push(marker);
        for line in lines {
            self.seen.insert(line.clone());
            self.items.push(line);
        }
    }

    fn push_lines(&mut self, lines: Vec<String>) {
        for line in lines.iter().filter_map(|line| usable(line)) {
            if self.remaining() == 0 {
                break;
            }
            if self.seen.insert(line.clone()) {
                self.items.push(line);
            }
        }
    }

    fn into_items(self) -> Vec<String> {
        self.items
    }
}

/// Trimmed line when it is long enough and not trash
fn usable(item: &str) -> Option<String> {
    let item = item.trim();
    (item.chars().count() > MIN_ITEM_CHARS && !keywords::is_trash(item)).then(|| item.to_string())
}

/// Innermost block elements mentioning the mandatory credential
fn mandatory_lines(document: &Html) -> Vec<String> {
    let all = match dom::selector("body *") {
        Some(selector) => selector,
        None => return Vec::new(),
    };

    document
        .select(&all)
        .filter(|el| is_block(el))
        .filter_map(|el| {
            let text = dom::element_text(&el);
            if text.chars().count() >= MAX_LINE_CHARS || !keywords::is_mandatory(&text) {
                return None;
            }
            let child_matches = el
                .children()
                .filter_map(ElementRef::wrap)
                .filter(is_block)
                .any(|child| keywords::is_mandatory(&dom::element_text(&child)));
            (!child_matches).then_some(text)
        })
        .collect()
}

fn is_block(element: &ElementRef) -> bool {
    let name = element.value().name();
    !SKIPPED_TAGS.contains(&name) && !INLINE_TAGS.contains(&name)
}

fn site_fallback_lines(document: &Html) -> Vec<String> {
    let listed: Vec<&str> = JobBoard::ALL
        .iter()
        .flat_map(|board| board.profile().requirement_selectors.iter().copied())
        .chain(GENERIC_FALLBACK_SELECTORS.iter().copied())
        .collect();

    dom::selectors(&listed)
        .iter()
        .flat_map(|selector| {
            document
                .select(selector)
                .map(|el| dom::element_text(&el))
                .collect::<Vec<_>>()
        })
        .filter(|line| {
            let len = line.chars().count();
            (MIN_LINE_CHARS..MAX_LINE_CHARS).contains(&len) && !keywords::is_trash(line)
        })
        .collect()
}

/// Trim, drop short and trash lines, dedupe keeping the first, cap
fn finalize(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| usable(item))
        .filter(|item| seen.insert(item.clone()))
        .take(cap)
        .collect()
}

/// Plain text of the cleaned page body, truncated to `max_chars`
pub fn body_excerpt(html: &str, max_chars: usize) -> String {
    let mut document = Html::parse_document(html);
    cleaner::strip_non_content(&mut document);

    let text = dom::selector("body")
        .and_then(|body| {
            document
                .select(&body)
                .next()
                .map(|el| dom::text_with_breaks(&el))
        })
        .unwrap_or_default();

    let lines: Vec<String> = text
        .lines()
        .map(dom::collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n").chars().take(max_chars).collect()
}

fn with_placeholder(items: Vec<String>) -> Vec<String> {
    if items.is_empty() {
        vec![PLACEHOLDER.to_string()]
    } else {
        items
    }
}

/// Requirement extraction with an optional generative fallback
pub struct RequirementsExtractor {
    retriever: Arc<PageRetriever>,
    generator: Option<Arc<dyn TextGenerator>>,
    config: RequirementsConfig,
}

impl RequirementsExtractor {
    pub fn new(
        retriever: Arc<PageRetriever>,
        generator: Option<Arc<dyn TextGenerator>>,
        config: RequirementsConfig,
    ) -> Self {
        Self {
            retriever,
            generator,
            config,
        }
    }

    /// Whether low-yield pages are sent to the generative service
    pub fn has_generative_fallback(&self) -> bool {
        self.generator.is_some()
    }

    /// Extract requirements from page HTML; never empty
    pub async fn extract(&self, html: &str) -> Vec<String> {
        let heuristic = extract_heuristic(html, &self.config);
        if heuristic.len() >= self.config.min_yield {
            return heuristic;
        }

        let result = match &self.generator {
            Some(generator) => self
                .generative_fallback(generator.as_ref(), html)
                .await
                .unwrap_or(heuristic),
            None => heuristic,
        };
        with_placeholder(result)
    }

    /// Fetch a posting and extract its requirements; fetch failures yield
    /// the placeholder
    pub async fn extract_from_url(&self, url: &str) -> Vec<String> {
        match self.retriever.fetch_content_page(url.trim()).await {
            Ok(page) => self.extract(&page.html).await,
            Err(e) => {
                warn!(
                    "Requirements fetch failed for {} ({:?}): {}",
                    url,
                    e.kind(),
                    e
                );
                with_placeholder(Vec::new())
            }
        }
    }

    async fn generative_fallback(
        &self,
        generator: &dyn TextGenerator,
        html: &str,
    ) -> Option<Vec<String>> {
        let excerpt = body_excerpt(html, self.config.llm_excerpt_chars);
        if excerpt.is_empty() {
            return None;
        }

        info!(
            "Requesting generative requirements from {} ({} chars)",
            generator.model_name(),
            excerpt.chars().count()
        );
        let prompt = format!("Job posting:\n\n{}", excerpt);
        match generator.complete_json_list(SYSTEM_PROMPT, &prompt).await {
            Ok(items) => {
                let items = finalize(items, self.config.llm_max_items);
                if items.is_empty() {
                    debug!("Generative service returned no usable requirements");
                    None
                } else {
                    Some(items)
                }
            }
            Err(e) => {
                warn!("Generative requirements fallback failed: {}", e);
                None
            }
        }
    }

    pub fn config(&self) -> &RequirementsConfig {
        &self.config
    }
}
