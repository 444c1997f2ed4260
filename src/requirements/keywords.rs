// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Keyword sets and classification for requirement extraction

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// School-leaving credential, including common synonyms and misspellings
const MANDATORY_PATTERN: &str = r"(?i)\b(?:matric(?:ulation)?|matriek|matrik|matirc|metric\s+certificate|grade\s*12|gr\.?\s*12|n\.?s\.?c\.?|(?:national\s+)?senior\s+certificate)\b";

/// UI chrome, social and legal boilerplate
const TRASH_KEYWORDS: &[&str] = &[
    "apply now",
    "apply online",
    "click here",
    "share this",
    "share on",
    "facebook",
    "twitter",
    "whatsapp",
    "instagram",
    "follow us",
    "cookie",
    "privacy policy",
    "terms of use",
    "terms and conditions",
    "all rights reserved",
    "copyright",
    "sign in",
    "log in",
    "login",
    "register now",
    "create an account",
    "subscribe",
    "newsletter",
    "job alert",
    "save job",
    "report this job",
    "similar jobs",
    "back to search",
    "view all jobs",
    "popi",
];

/// Headings that introduce the company or the advert rather than requirements
const INTRO_HEADINGS: &[&str] = &[
    "about us",
    "about the company",
    "about the client",
    "about our client",
    "company overview",
    "company description",
    "company profile",
    "who we are",
    "introduction",
    "our client",
    "what we offer",
    "benefits",
    "how to apply",
    "closing date",
    "remuneration",
    "salary",
    "job reference",
];

/// Headings that introduce requirements, duties or qualifications
const DOMAIN_KEYWORDS: &[&str] = &[
    "requirement",
    "duties",
    "duty",
    "responsibilit",
    "qualification",
    "skill",
    "experience",
    "criteria",
    "competenc",
    "knowledge",
    "key performance",
    "outputs",
    "essential",
    "minimum",
    "must have",
    "what you need",
    "what you will need",
    "looking for",
    "ideal candidate",
    "desired",
    "advantage",
    "preferred",
];

const DUTY_KEYWORDS: &[&str] = &["duty", "duties", "responsibilit", "output", "key performance", "what you will do"];
const PREFERRED_KEYWORDS: &[&str] = &["desired", "desirable", "advantage", "preferred", "nice to have", "beneficial"];

/// Section category used in `SECTION:` markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Required,
    Duties,
    Preferred,
}

impl Category {
    /// Classify a heading; anything not a duty or a preference is required
    pub fn classify(heading: &str) -> Self {
        let lower = heading.to_lowercase();
        if contains_any(&lower, DUTY_KEYWORDS) {
            Category::Duties
        } else if contains_any(&lower, PREFERRED_KEYWORDS) {
            Category::Preferred
        } else {
            Category::Required
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Required => "REQUIRED",
            Category::Duties => "DUTIES",
            Category::Preferred => "PREFERRED",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn mandatory_regex() -> Option<&'static Regex> {
    static MANDATORY: OnceLock<Option<Regex>> = OnceLock::new();
    MANDATORY
        .get_or_init(|| Regex::new(MANDATORY_PATTERN).ok())
        .as_ref()
}

fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(k))
}

/// Text mentions the mandatory school-leaving credential
pub fn is_mandatory(text: &str) -> bool {
    mandatory_regex().map_or(false, |re| re.is_match(text))
}

/// Text contains a denylisted boilerplate phrase
pub fn is_trash(text: &str) -> bool {
    contains_any(&text.to_lowercase(), TRASH_KEYWORDS)
}

/// Heading introduces company or advert boilerplate
pub fn is_intro_heading(heading: &str) -> bool {
    contains_any(&heading.to_lowercase(), INTRO_HEADINGS)
}

/// Heading names a requirements-domain section or ends with a colon
pub fn is_requirements_heading(heading: &str) -> bool {
    let trimmed = heading.trim();
    trimmed.ends_with(':') || contains_any(&trimmed.to_lowercase(), DOMAIN_KEYWORDS)
}
