// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Main description block selection
//!
//! Works on the cleaned document. Selectors are tried in order:
//! 1. The owning board's content selectors (when the URL belongs to a known board)
//! 2. Description data attributes and common description classes
//! 3. `<main>`, `<article>`, `[role='main']`, `#content`
//!
//! For each selector the longest match wins, and the first winner over the
//! configured threshold is returned. Otherwise every long-enough paragraph
//! and list item is concatenated.

use scraper::{ElementRef, Html};

use super::cleaner;
use super::config::ContentConfig;
use crate::dom;
use crate::jobs::JobBoard;

const GENERIC_SELECTORS: &[&str] = &[
    "[data-automation='jobDescription']",
    "[data-testid='jobDescriptionText']",
    "[itemprop='description']",
    ".job-description",
    ".job_description",
    "#job-description",
    ".vacancy-description",
    ".job-details",
    "main",
    "article",
    "[role='main']",
    "#content",
];

/// Clean a posting page and return its description markup
pub fn extract_content(html: &str, page_url: &str, config: &ContentConfig) -> String {
    let mut document = Html::parse_document(html);
    cleaner::strip_non_content(&mut document);

    let site_selectors = JobBoard::for_url(page_url)
        .map(|board| board.profile().content_selectors)
        .unwrap_or(&[]);

    select_main_content(&document, site_selectors, config.min_content_chars)
        .unwrap_or_else(|| paragraph_fallback(&document, config.min_fragment_chars))
}

/// Longest match of the first selector whose best match exceeds `min_chars`
pub fn select_main_content(
    document: &Html,
    site_selectors: &[&str],
    min_chars: usize,
) -> Option<String> {
    let ordered: Vec<&str> = site_selectors
        .iter()
        .chain(GENERIC_SELECTORS.iter())
        .copied()
        .collect();

    dom::selectors(&ordered).iter().find_map(|selector| {
        document
            .select(selector)
            .map(|el| el.inner_html())
            .max_by_key(|markup| markup.len())
            .filter(|markup| markup.trim().len() > min_chars)
    })
}

/// Concatenate every paragraph and list item whose text exceeds `min_chars`
///
/// Items nested inside another `p`/`li` are skipped so text is not repeated.
pub fn paragraph_fallback(document: &Html, min_chars: usize) -> String {
    let fragments = match dom::selector("p, li") {
        Some(selector) => selector,
        None => return String::new(),
    };

    document
        .select(&fragments)
        .filter(|el| !nested_in_fragment(el))
        .filter(|el| dom::element_text(el).chars().count() > min_chars)
        .map(|el| el.html())
        .collect::<Vec<_>>()
        .join("\n")
}

fn nested_in_fragment(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| matches!(ancestor.value().name(), "p" | "li"))
}
