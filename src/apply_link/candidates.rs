// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Synchronous apply-link candidate discovery
//!
//! Three sources, tried in order by the resolver: embedded JobPosting
//! structured data, anchor heuristics, and a board-specific pattern over
//! inline script text.

use regex::Regex;
use scraper::Html;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::config::{is_login_url, same_site, ApplyLinkConfig};
use crate::dom;
use crate::jobs::JobBoard;

const APPLY_PHRASES: &[&str] = &[
    "apply externally",
    "apply on company site",
    "apply on company website",
    "apply on employer site",
    "apply on employer's site",
    "apply on the company website",
];

/// Candidate from JobPosting structured data
pub fn from_structured_data(
    document: &Html,
    page_url: &Url,
    config: &ApplyLinkConfig,
) -> Option<String> {
    let selector = dom::selector("script[type='application/ld+json']")?;

    document
        .select(&selector)
        .filter_map(|script| {
            let raw = script.text().collect::<String>();
            match serde_json::from_str::<Value>(raw.trim()) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Skipping malformed structured data block: {}", e);
                    None
                }
            }
        })
        .flat_map(|value| {
            let mut urls = Vec::new();
            collect_job_posting_urls(&value, &mut urls);
            urls
        })
        .filter_map(|raw| absolutize(page_url, &raw))
        .find(|url| is_first_party(url, page_url, config))
}

fn collect_job_posting_urls(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_job_posting_urls(item, out);
            }
        }
        Value::Object(map) => {
            if let Some(graph) = map.get("@graph") {
                collect_job_posting_urls(graph, out);
            }
            if !is_job_posting(map.get("@type")) {
                return;
            }
            if let Some(url) = map.get("url").and_then(Value::as_str) {
                out.push(url.to_string());
            }
            if let Some(url) = map
                .get("applicationContact")
                .and_then(|c| c.get("url"))
                .and_then(Value::as_str)
            {
                out.push(url.to_string());
            }
        }
        _ => {}
    }
}

fn is_job_posting(declared: Option<&Value>) -> bool {
    match declared {
        Some(Value::String(t)) => t == "JobPosting",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("JobPosting")),
        _ => false,
    }
}

/// Candidate from anchors: an ATS-hosted href, or "apply externally"-style
/// text pointing off-site. First qualifying anchor wins.
pub fn from_anchors(document: &Html, page_url: &Url, config: &ApplyLinkConfig) -> Option<String> {
    let selector = dom::selector("a[href]")?;

    for anchor in document.select(&selector) {
        let href = match anchor.value().attr("href").and_then(|h| absolutize(page_url, h)) {
            Some(href) => href,
            None => continue,
        };

        if config.is_ats(&href) {
            return Some(href);
        }

        let text = dom::element_text(&anchor).to_lowercase();
        let phrase_match = text == "apply" || APPLY_PHRASES.iter().any(|p| text.contains(p));
        if phrase_match
            && !same_site(&href, page_url.as_str())
            && !config.is_aggregator(&href)
            && !is_login_url(&href)
        {
            return Some(href);
        }
    }

    None
}

/// Candidate embedded in inline script text, for boards that have a pattern
pub fn from_inline_script(html: &str, page_url: &Url, config: &ApplyLinkConfig) -> Option<String> {
    let pattern = JobBoard::for_url(page_url.as_str())?
        .profile()
        .inline_apply_pattern?;
    let regex = Regex::new(pattern).ok()?;

    let found = regex
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| unescape_script_url(m.as_str())))
        .filter_map(|raw| absolutize(page_url, &raw))
        .find(|url| is_first_party(url, page_url, config));
    found
}

/// Undo the JSON string escaping found in inline scripts
pub fn unescape_script_url(raw: &str) -> String {
    raw.replace("\\/", "/")
        .replace("\\u0026", "&")
        .replace("\\u003d", "=")
        .replace("&amp;", "&")
}

/// Not the page's own site, not a denied aggregator, not a login page
pub fn is_first_party(url: &str, page_url: &Url, config: &ApplyLinkConfig) -> bool {
    !same_site(url, page_url.as_str()) && !config.is_aggregator(url) && !is_login_url(url)
}

fn absolutize(page_url: &Url, href: &str) -> Option<String> {
    let joined = page_url.join(href.trim()).ok()?;
    match joined.scheme() {
        "http" | "https" => Some(joined.to_string()),
        _ => None,
    }
}
