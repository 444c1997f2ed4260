// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Small helpers over `scraper` shared by the parsing stages
//!
//! `scraper::Html` is not `Send`, so every caller parses and drops the
//! document inside a synchronous function before the next `.await`.

use scraper::{ElementRef, Selector};
use tracing::debug;

/// Block-level tags that introduce a line break when flattened to text
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "tr", "td", "section", "article", "h1", "h2", "h3", "h4",
    "h5", "h6", "table", "header", "footer",
];

/// Parse a list of CSS selectors, skipping invalid entries
pub fn selectors(list: &[&str]) -> Vec<Selector> {
    list.iter()
        .filter_map(|s| match Selector::parse(s) {
            Ok(selector) => Some(selector),
            Err(e) => {
                debug!("Skipping invalid selector '{}': {:?}", s, e);
                None
            }
        })
        .collect()
}

/// Parse a single CSS selector
pub fn selector(s: &str) -> Option<Selector> {
    Selector::parse(s).ok()
}

/// Normalize whitespace runs to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element with whitespace collapsed
pub fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Text of the first descendant matching any selector, in selector order
pub fn first_text(element: &ElementRef, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        element
            .select(selector)
            .map(|el| element_text(&el))
            .find(|text| !text.is_empty())
    })
}

/// Attribute of the first descendant matching any selector, in selector order
pub fn first_attr(element: &ElementRef, selectors: &[Selector], attr: &str) -> Option<String> {
    selectors.iter().find_map(|selector| {
        element
            .select(selector)
            .filter_map(|el| el.value().attr(attr))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_string)
    })
}

/// Flatten an element to text, turning `<br>` and block boundaries into
/// newlines so callers can split on lines
pub fn text_with_breaks(element: &ElementRef) -> String {
    let mut out = String::new();
    push_text(element, &mut out);
    out
}

fn push_text(element: &ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if name == "br" {
                out.push('\n');
                continue;
            }
            let block = BLOCK_TAGS.contains(&name);
            if block {
                out.push('\n');
            }
            push_text(&child_element, out);
            if block {
                out.push('\n');
            }
        }
    }
}
