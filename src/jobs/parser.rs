// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Listing page parsing driven by a board's `SiteProfile`

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

use super::boards::SiteProfile;
use super::types::JobSummary;
use crate::dom;

/// Parse a board's search results page into job summaries
///
/// Tries card selectors in priority order and uses the first one that
/// matches anything. Cards without a title or a resolvable link, and
/// titles of `title_max_chars` or more, are dropped. Output follows
/// document order and stops at `cap`. Never fails: markup that matches
/// nothing yields an empty list.
pub fn parse_listing(
    profile: &SiteProfile,
    html: &str,
    cap: usize,
    title_max_chars: usize,
    timestamp_ms: i64,
) -> Vec<JobSummary> {
    let origin = match Url::parse(profile.origin) {
        Ok(origin) => origin,
        Err(_) => return Vec::new(),
    };

    let document = Html::parse_document(html);

    let cards: Vec<ElementRef> = dom::selectors(profile.card_selectors)
        .iter()
        .map(|selector| document.select(selector).collect::<Vec<_>>())
        .find(|matched| !matched.is_empty())
        .unwrap_or_default();

    let title_rules = dom::selectors(profile.rules.title);
    let company_rules = dom::selectors(profile.rules.company);
    let location_rules = dom::selectors(profile.rules.location);
    let link_rules = dom::selectors(profile.rules.link);
    let posted_rules = dom::selectors(profile.rules.posted);
    let any_anchor = dom::selectors(&["a[href]"]);

    let mut seen_links = HashSet::new();
    let mut results = Vec::new();

    for card in cards {
        if results.len() >= cap {
            break;
        }

        let title = dom::first_text(&card, &title_rules)
            .or_else(|| own_anchor_text(&card))
            .unwrap_or_default();
        if title.is_empty() || title.chars().count() >= title_max_chars {
            continue;
        }

        let href = dom::first_attr(&card, &link_rules, "href")
            .or_else(|| own_href(&card))
            .or_else(|| dom::first_attr(&card, &any_anchor, "href"));
        let link = match href.and_then(|h| resolve_link(&origin, &h)) {
            Some(link) => link,
            None => continue,
        };

        if !seen_links.insert(link.clone()) {
            continue;
        }

        results.push(JobSummary {
            id: JobSummary::make_id(profile.id, timestamp_ms, results.len()),
            title,
            company: text_or_empty(&card, &company_rules),
            location: text_or_empty(&card, &location_rules),
            link,
            source: profile.id.to_string(),
            posted_label: dom::first_text(&card, &posted_rules),
        });
    }

    results
}

/// Resolve protocol-relative and site-relative hrefs against the board origin
pub fn resolve_link(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }

    let resolved = origin.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

fn text_or_empty(card: &ElementRef, rules: &[Selector]) -> String {
    dom::first_text(card, rules).unwrap_or_default()
}

fn own_href(card: &ElementRef) -> Option<String> {
    if card.value().name() == "a" {
        card.value().attr("href").map(str::to_string)
    } else {
        None
    }
}

fn own_anchor_text(card: &ElementRef) -> Option<String> {
    if card.value().name() == "a" {
        Some(dom::element_text(card)).filter(|t| !t.is_empty())
    } else {
        None
    }
}
