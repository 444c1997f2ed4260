// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Removal of non-content elements from a parsed page

use scraper::Html;

use crate::dom;

/// Scripts, media, navigation, forms, controls and known page chrome
const STRIP_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "template",
    "iframe",
    "img",
    "picture",
    "video",
    "audio",
    "svg",
    "canvas",
    "nav",
    "header",
    "footer",
    "aside",
    "form",
    "button",
    "input",
    "select",
    "textarea",
    "label",
    ".ad",
    ".ads",
    ".advert",
    ".advertisement",
    "[class*='cookie']",
    "[id*='cookie']",
    "[class*='consent']",
    "[class*='social']",
    "[class*='share']",
    "[class*='newsletter']",
    "[class*='related-jobs']",
    "[class*='similar-jobs']",
    "[class*='recommended-jobs']",
    "[class*='breadcrumb']",
];

const CONTAINERS: &str = "div, span, p, li, ul, ol, section";
const MAX_EMPTY_PASSES: usize = 32;

/// Detach every non-content element, then prune containers left empty
pub fn strip_non_content(document: &mut Html) {
    let selectors = dom::selectors(STRIP_SELECTORS);
    let doomed: Vec<_> = selectors
        .iter()
        .flat_map(|selector| document.select(selector).map(|el| el.id()).collect::<Vec<_>>())
        .collect();

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    remove_empty_containers(document);
}

/// Repeatedly drop containers with no element children and no visible
/// text, so emptied parents go on the next pass
pub fn remove_empty_containers(document: &mut Html) {
    let containers = match dom::selector(CONTAINERS) {
        Some(selector) => selector,
        None => return,
    };

    for _ in 0..MAX_EMPTY_PASSES {
        let empty: Vec<_> = document
            .select(&containers)
            .filter(|el| {
                !el.children().any(|child| child.value().is_element())
                    && el.text().all(|t| t.trim().is_empty())
            })
            .map(|el| el.id())
            .collect();

        if empty.is_empty() {
            break;
        }

        for id in empty {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }
    }
}
