// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Domain sets used to classify apply-link candidates

use std::env;
use url::Url;

use crate::jobs::JobBoard;

/// Applicant-tracking systems whose links are trusted as first-party apply pages
const DEFAULT_ATS_DOMAINS: &[&str] = &[
    "myworkdayjobs.com",
    "myworkdaysite.com",
    "greenhouse.io",
    "lever.co",
    "icims.com",
    "smartrecruiters.com",
    "successfactors.com",
    "successfactors.eu",
    "taleo.net",
    "bamboohr.com",
    "workable.com",
    "recruitee.com",
    "jobvite.com",
    "oraclecloud.com",
    "breezy.hr",
    "teamtailor.com",
    "applytojob.com",
    "zohorecruit.com",
];

/// Listing sites that are never accepted as the employer's apply page
const DEFAULT_AGGREGATOR_DOMAINS: &[&str] = &[
    "linkedin.com",
    "glassdoor.com",
    "glassdoor.co.za",
    "gumtree.co.za",
    "jobmail.co.za",
    "executiveplacements.com",
    "jobplacements.com",
    "bestjobs.co.za",
];

/// Secondary aggregators and short-link hosts worth following to the landing page
const DEFAULT_REDIRECT_DOMAINS: &[&str] = &[
    "adzuna.co.za",
    "adzuna.com",
    "jooble.org",
    "careerjet.co.za",
    "talent.com",
    "jobrapido.com",
    "whatjobs.com",
    "bit.ly",
    "lnkd.in",
    "t.co",
    "tinyurl.com",
    "ow.ly",
];

const LOGIN_MARKERS: &[&str] = &["login", "signin", "sign-in", "sign_in"];

/// Configuration for apply-link resolution
#[derive(Debug, Clone)]
pub struct ApplyLinkConfig {
    /// Applicant-tracking system domains (allowlist)
    pub ats_domains: Vec<String>,
    /// Primary listing aggregators (denylist), including every registered board
    pub aggregator_domains: Vec<String>,
    /// Secondary aggregators and short links to redirect-chase
    pub redirect_domains: Vec<String>,
}

impl ApplyLinkConfig {
    /// Load configuration from environment variables
    ///
    /// Comma-separated env lists extend the built-in sets.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config
            .ats_domains
            .extend(env_list("APPLY_ATS_DOMAINS"));
        config
            .aggregator_domains
            .extend(env_list("APPLY_AGGREGATOR_DOMAINS"));
        config
            .redirect_domains
            .extend(env_list("APPLY_REDIRECT_DOMAINS"));
        config
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if let Some(domain) = self
            .redirect_domains
            .iter()
            .find(|d| self.aggregator_domains.contains(d))
        {
            return Err(format!(
                "{} cannot be both a denied aggregator and a redirect-chase domain",
                domain
            ));
        }
        Ok(())
    }

    pub fn is_ats(&self, url: &str) -> bool {
        host_matches(url, &self.ats_domains)
    }

    pub fn is_aggregator(&self, url: &str) -> bool {
        host_matches(url, &self.aggregator_domains)
    }

    pub fn is_redirect_domain(&self, url: &str) -> bool {
        host_matches(url, &self.redirect_domains)
    }
}

impl Default for ApplyLinkConfig {
    fn default() -> Self {
        let mut aggregator_domains: Vec<String> = JobBoard::ALL
            .iter()
            .map(|board| board.profile().domain.to_string())
            .collect();
        aggregator_domains.extend(DEFAULT_AGGREGATOR_DOMAINS.iter().map(|d| d.to_string()));

        Self {
            ats_domains: DEFAULT_ATS_DOMAINS.iter().map(|d| d.to_string()).collect(),
            aggregator_domains,
            redirect_domains: DEFAULT_REDIRECT_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

fn env_list(key: &str) -> Vec<String> {
    env::var(key)
        .map(|v| {
            v.split(',')
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Lowercased host of a URL
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// Suffix match on dot boundaries: `jobs.lever.co` matches `lever.co`
pub fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

fn host_matches(url: &str, domains: &[String]) -> bool {
    match host_of(url) {
        Some(host) => domains.iter().any(|d| domain_matches(&host, d)),
        None => false,
    }
}

/// Both URLs live on the same site, ignoring a leading `www.`
pub fn same_site(a: &str, b: &str) -> bool {
    match (host_of(a), host_of(b)) {
        (Some(a), Some(b)) => {
            let a = a.trim_start_matches("www.");
            let b = b.trim_start_matches("www.");
            domain_matches(a, b) || domain_matches(b, a)
        }
        _ => false,
    }
}

/// URL looks like a login or sign-in page
pub fn is_login_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    LOGIN_MARKERS.iter().any(|marker| lower.contains(marker))
}
