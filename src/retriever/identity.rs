// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request identities presented to source sites

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, REFERER, USER_AGENT};
use reqwest::RequestBuilder;

const STEALTH_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const MINIMAL_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; FabstirJobHarvester/1.0; +https://fabstir.com)";

/// Header profile used for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// Desktop browser signature with referer and cache headers
    Stealth,
    /// Plain descriptive bot user agent
    Minimal,
}

impl Identity {
    pub fn name(&self) -> &'static str {
        match self {
            Identity::Stealth => "stealth",
            Identity::Minimal => "minimal",
        }
    }

    pub fn user_agent(&self) -> &'static str {
        match self {
            Identity::Stealth => STEALTH_USER_AGENT,
            Identity::Minimal => MINIMAL_USER_AGENT,
        }
    }

    /// Attach this identity's headers to a request
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Identity::Stealth => request
                .header(USER_AGENT, STEALTH_USER_AGENT)
                .header(
                    ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
                )
                .header(ACCEPT_LANGUAGE, "en-ZA,en-GB;q=0.9,en-US;q=0.8,en;q=0.7")
                .header(REFERER, "https://www.google.com/")
                .header(CACHE_CONTROL, "no-cache")
                .header("Pragma", "no-cache")
                .header("Upgrade-Insecure-Requests", "1"),
            Identity::Minimal => request
                .header(USER_AGENT, MINIMAL_USER_AGENT)
                .header(ACCEPT, "text/html"),
        }
    }
}
