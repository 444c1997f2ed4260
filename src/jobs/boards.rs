// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Static registry of supported job boards
//!
//! Each board is described by data only: how to build its search URL,
//! which selectors find result cards, and which rules pull the title,
//! company, location, link and posted label out of a card. Adding a board
//! means adding a `SiteProfile` and a `JobBoard` variant.

use std::fmt;
use std::str::FromStr;
use url::Url;

/// How the query is embedded in a board's search URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStyle {
    /// Lowercase hyphenated path segment (`java-developer`)
    Slug,
    /// Form-encoded query parameter (`java+developer`)
    Encoded,
}

/// Selector rules for the fields of one result card
#[derive(Debug)]
pub struct ExtractionRules {
    pub title: &'static [&'static str],
    pub company: &'static [&'static str],
    pub location: &'static [&'static str],
    pub link: &'static [&'static str],
    pub posted: &'static [&'static str],
}

/// DOM description of one job board
#[derive(Debug)]
pub struct SiteProfile {
    /// Source tag written into every summary
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Origin used to resolve relative hrefs
    pub origin: &'static str,
    /// Registrable domain used to recognise the board's pages
    pub domain: &'static str,
    /// Search URL with a `{query}` placeholder
    pub search_template: &'static str,
    pub query_style: QueryStyle,
    /// Result card selectors, most specific first
    pub card_selectors: &'static [&'static str],
    pub rules: ExtractionRules,
    /// Default per-search result cap
    pub default_cap: usize,
    /// Main-content selectors for this board's posting pages
    pub content_selectors: &'static [&'static str],
    /// Requirement list selectors for this board's posting pages
    pub requirement_selectors: &'static [&'static str],
    /// Pattern whose first group is an external apply URL embedded in script text
    pub inline_apply_pattern: Option<&'static str>,
}

impl SiteProfile {
    /// Build the search URL for a query
    pub fn search_url(&self, query: &str) -> String {
        let encoded = match self.query_style {
            QueryStyle::Slug => slugify(query),
            QueryStyle::Encoded => url::form_urlencoded::byte_serialize(query.trim().as_bytes())
                .collect::<String>(),
        };
        self.search_template.replace("{query}", &encoded)
    }

    /// Check whether a URL belongs to this board
    pub fn owns_url(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .map(|host| host == self.domain || host.ends_with(&format!(".{}", self.domain)))
            .unwrap_or(false)
    }
}

fn slugify(query: &str) -> String {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

static CAREERS24: SiteProfile = SiteProfile {
    id: "careers24",
    name: "Careers24",
    origin: "https://www.careers24.com",
    domain: "careers24.com",
    search_template: "https://www.careers24.com/jobs/kw-{query}/",
    query_style: QueryStyle::Slug,
    card_selectors: &["div.job-card", "div.c24-job-card", "li.job-list-item"],
    rules: ExtractionRules {
        title: &["h2 a", ".job-card-head a", "a[data-control='vacancy-title']"],
        company: &[".job-card-company", "[data-control='company-name']", ".company"],
        location: &[".job-card-location", "li.location", "[data-control='location']"],
        link: &["h2 a[href]", "a.job-card-link[href]", "a[href*='/jobs/adverts/']"],
        posted: &[".posted-date", "li.date", "time"],
    },
    default_cap: 15,
    content_selectors: &["[data-control='vacancy-details']", ".c24-vacancy-details", ".v-descrip"],
    requirement_selectors: &[".v-descrip li", ".c24-vacancy-details li", "[data-control='vacancy-details'] li"],
    inline_apply_pattern: Some(
        r#"(?i)["']?(?:externalApplyUrl|externalUrl|applyUrl)["']?\s*[:=]\s*["'](https?:[^"']+)["']"#,
    ),
};

static PNET: SiteProfile = SiteProfile {
    id: "pnet",
    name: "PNet",
    origin: "https://www.pnet.co.za",
    domain: "pnet.co.za",
    search_template: "https://www.pnet.co.za/jobs/{query}",
    query_style: QueryStyle::Slug,
    card_selectors: &["article[data-at='job-item']", "[data-testid='job-item']", "article.job-element"],
    rules: ExtractionRules {
        title: &["[data-at='job-item-title']", "h2 a", "h2"],
        company: &["[data-at='job-item-company-name']", ".job-element__body__company"],
        location: &["[data-at='job-item-location']", ".job-element__body__location"],
        link: &["a[data-at='job-item-title'][href]", "h2 a[href]", "a[href]"],
        posted: &["[data-at='job-item-timeago']", "time"],
    },
    default_cap: 15,
    content_selectors: &["[data-at='job-ad-content']", "[data-at='job-ad-container']", ".job-ad-display"],
    requirement_selectors: &["[data-at='job-ad-content'] li", ".job-ad-display li"],
    inline_apply_pattern: None,
};

static CAREER_JUNCTION: SiteProfile = SiteProfile {
    id: "careerjunction",
    name: "CareerJunction",
    origin: "https://www.careerjunction.co.za",
    domain: "careerjunction.co.za",
    search_template: "https://www.careerjunction.co.za/jobs/results?keywords={query}",
    query_style: QueryStyle::Encoded,
    card_selectors: &["div.module.job-result", "div.job-result", "article.job-result"],
    rules: ExtractionRules {
        title: &[".job-result-title h2 a", ".job-result-title h2", "h2 a"],
        company: &[".job-result-title h3 a", ".job-result-title h3", "h3"],
        location: &[".job-result-overview li.location", "li.location"],
        link: &[".job-result-title h2 a[href]", "h2 a[href]"],
        posted: &[".updated-time", "li.updated-time"],
    },
    default_cap: 15,
    content_selectors: &["#JobDetails", ".job-details", ".job-ad-body"],
    requirement_selectors: &["#JobDetails li", ".job-details li", ".job-ad-body li"],
    inline_apply_pattern: None,
};

static INDEED: SiteProfile = SiteProfile {
    id: "indeed",
    name: "Indeed",
    origin: "https://za.indeed.com",
    domain: "indeed.com",
    search_template: "https://za.indeed.com/jobs?q={query}",
    query_style: QueryStyle::Encoded,
    card_selectors: &["div.job_seen_beacon", "div.cardOutline", "td.resultContent"],
    rules: ExtractionRules {
        title: &["h2.jobTitle span[title]", "h2.jobTitle", "a.jcs-JobTitle"],
        company: &["[data-testid='company-name']", "span.companyName"],
        location: &["[data-testid='text-location']", "div.companyLocation"],
        link: &["a.jcs-JobTitle[href]", "h2.jobTitle a[href]"],
        posted: &["span.date", "[data-testid='myJobsStateDate']"],
    },
    // Noisier source: trust but limit
    default_cap: 3,
    content_selectors: &["#jobDescriptionText", "[data-testid='jobDescriptionText']"],
    requirement_selectors: &["#jobDescriptionText li", "#jobDescriptionText p"],
    inline_apply_pattern: None,
};

/// Supported job boards, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobBoard {
    Careers24,
    PNet,
    CareerJunction,
    Indeed,
}

impl JobBoard {
    /// All boards in registration order
    pub const ALL: [JobBoard; 4] = [
        JobBoard::Careers24,
        JobBoard::PNet,
        JobBoard::CareerJunction,
        JobBoard::Indeed,
    ];

    pub fn profile(&self) -> &'static SiteProfile {
        match self {
            JobBoard::Careers24 => &CAREERS24,
            JobBoard::PNet => &PNET,
            JobBoard::CareerJunction => &CAREER_JUNCTION,
            JobBoard::Indeed => &INDEED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.profile().id
    }

    /// Find the board whose pages include `url`
    pub fn for_url(url: &str) -> Option<JobBoard> {
        Self::ALL
            .iter()
            .copied()
            .find(|board| board.profile().owns_url(url))
    }
}

impl fmt::Display for JobBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobBoard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|board| board.as_str() == wanted)
            .ok_or_else(|| format!("unknown job board '{}'", s))
    }
}
