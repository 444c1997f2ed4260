// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Heading-anchored section extraction
//!
//! A section starts at a heading-like element (heading tag, bold text, or a
//! site section-title class). Its lines come from the following siblings,
//! read through a bounded [`SectionCursor`] that stops at the next
//! heading-like element.

use scraper::{ElementRef, Html};
use std::collections::HashSet;
use std::iter::FusedIterator;

use super::keywords::{self, Category};
use crate::dom;

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, strong, b, .section-title, .job-section-title, .v-descrip-title";
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const TITLE_CLASSES: &[&str] = &["section-title", "job-section-title", "v-descrip-title"];
const BULLETS: &[char] = &['•', '·', '▪', '●', '◦', '■', '►', '*', '-', '–'];

/// Headings outside this character range are ignored
pub const HEADING_MIN_CHARS: usize = 3;
pub const HEADING_MAX_CHARS: usize = 80;
/// Collected lines shorter than this are discarded
pub const MIN_LINE_CHARS: usize = 10;

/// One requirements section found on a page
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub category: Category,
    pub heading: String,
    pub lines: Vec<String>,
}

impl Section {
    /// Synthetic marker emitted ahead of the section's lines
    pub fn marker(&self) -> String {
        format!("SECTION: [{}] {}", self.category, self.heading)
    }
}

/// Lazy, finite sequence of candidate lines following a heading
///
/// Reads at most `limit` non-blank siblings of the anchor and stops early
/// at the next heading-like sibling. Lines are trimmed of bullets and
/// filtered by length and the trash denylist.
pub struct SectionCursor<'a> {
    lines: Box<dyn Iterator<Item = String> + 'a>,
}

impl<'a> SectionCursor<'a> {
    pub fn new(anchor: ElementRef<'a>, limit: usize) -> Self {
        let lines = anchor
            .next_siblings()
            .filter(|node| match node.value().as_text() {
                Some(text) => !text.trim().is_empty(),
                None => node.value().is_element(),
            })
            .take(limit)
            .map_while(|node| {
                if let Some(text) = node.value().as_text() {
                    return Some(split_lines(text));
                }
                let element = ElementRef::wrap(node)?;
                if is_heading_like(&element) {
                    None
                } else {
                    Some(element_lines(&element))
                }
            })
            .flatten()
            .filter(|line| line.chars().count() >= MIN_LINE_CHARS && !keywords::is_trash(line));

        Self {
            lines: Box::new(lines),
        }
    }
}

impl Iterator for SectionCursor<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.lines.next()
    }
}

impl FusedIterator for SectionCursor<'_> {}

/// Find every accepted requirements section in document order
///
/// A heading with no collected lines yields no section.
pub fn extract_sections(document: &Html, walk_limit: usize) -> Vec<Section> {
    let headings = match dom::selector(HEADING_SELECTOR) {
        Some(selector) => selector,
        None => return Vec::new(),
    };

    let mut seen_anchors = HashSet::new();
    let mut sections = Vec::new();

    for element in document.select(&headings) {
        let heading = dom::element_text(&element);
        let len = heading.chars().count();
        if !(HEADING_MIN_CHARS..=HEADING_MAX_CHARS).contains(&len) {
            continue;
        }
        if keywords::is_intro_heading(&heading) || !keywords::is_requirements_heading(&heading) {
            continue;
        }

        let anchor = anchor_for(element, &heading);
        if !seen_anchors.insert(anchor.id()) {
            continue;
        }

        let lines: Vec<String> = SectionCursor::new(anchor, walk_limit).collect();
        if lines.is_empty() {
            continue;
        }

        sections.push(Section {
            category: Category::classify(&heading),
            heading,
            lines,
        });
    }

    sections
}

/// Bold text that is the whole content of its parent anchors on the parent
fn anchor_for<'a>(element: ElementRef<'a>, heading: &str) -> ElementRef<'a> {
    if !is_bold(&element) {
        return element;
    }
    element
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|parent| parent.value().name() != "body" && dom::element_text(parent) == heading)
        .unwrap_or(element)
}

fn is_bold(element: &ElementRef) -> bool {
    matches!(element.value().name(), "strong" | "b")
}

/// Stop predicate for the sibling walk
fn is_heading_like(element: &ElementRef) -> bool {
    let name = element.value().name();
    if HEADING_TAGS.contains(&name) {
        return true;
    }
    if element
        .value()
        .classes()
        .any(|class| TITLE_CLASSES.contains(&class))
    {
        return true;
    }

    let text = dom::element_text(element);
    let len = text.chars().count();
    if !(HEADING_MIN_CHARS..=HEADING_MAX_CHARS).contains(&len) {
        return false;
    }
    if is_bold(element) {
        return true;
    }
    // A paragraph holding only bold text
    matches!(name, "p" | "div" | "span")
        && element
            .children()
            .filter_map(ElementRef::wrap)
            .any(|child| is_bold(&child) && dom::element_text(&child) == text)
}

/// Lines from one sibling element: list items when present, otherwise its
/// text split on line breaks and bullet characters
fn element_lines(element: &ElementRef) -> Vec<String> {
    if element.value().name() == "li" {
        return vec![clean_line(&dom::element_text(element))];
    }

    let items: Vec<String> = dom::selector("li")
        .map(|li| {
            element
                .select(&li)
                .map(|item| clean_line(&dom::element_text(&item)))
                .filter(|line| !line.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if items.is_empty() {
        split_lines(&dom::text_with_breaks(element))
    } else {
        items
    }
}

/// Split text on newlines and inline bullet characters
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(['\n', '•', '●', '▪', '■'])
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect()
}

fn clean_line(line: &str) -> String {
    let collapsed = dom::collapse_whitespace(line);
    collapsed
        .trim_start_matches(|c: char| BULLETS.contains(&c) || c.is_whitespace())
        .trim()
        .to_string()
}
