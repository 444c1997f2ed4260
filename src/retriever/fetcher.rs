// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page retrieval with identity fallback and hard timeouts

use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, ToSocketAddrs};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::{Host, Url};

use super::config::RetrieverConfig;
use super::identity::Identity;
use super::types::{BlockedRedirect, FetchError, RetrievedPage};

/// Resolves the landing URL of a redirecting link
#[async_trait]
pub trait RedirectProbe: Send + Sync {
    /// Follow redirects from `url` and return the final URL
    async fn final_url(&self, url: &str) -> Result<String, FetchError>;
}

/// Page retriever shared by adapters, the content resolver and the
/// requirements extractor
pub struct PageRetriever {
    client: Client,
    config: RetrieverConfig,
}

impl PageRetriever {
    /// Create a new retriever
    pub fn new(config: RetrieverConfig) -> anyhow::Result<Self> {
        let max_redirects = config.max_redirects;
        let allow_private = config.allow_private_hosts;
        let policy = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() > max_redirects {
                return attempt.error("too many redirects");
            }
            if !Self::redirect_allowed(attempt.url(), allow_private) {
                let blocked = BlockedRedirect(attempt.url().to_string());
                return attempt.error(blocked);
            }
            attempt.follow()
        });

        let client = Client::builder().redirect(policy).build()?;

        Ok(Self { client, config })
    }

    /// Fetch a page with a single identity
    ///
    /// The budget covers connect, headers and body. Dropping the inner
    /// future on expiry closes the connection.
    pub async fn fetch(
        &self,
        url: &str,
        identity: Identity,
        budget: Duration,
    ) -> Result<RetrievedPage, FetchError> {
        self.check_url(url)?;
        self.check_resolved(url).await?;

        let timeout_ms = budget.as_millis() as u64;
        debug!("Fetching {} with {} identity", url, identity.name());

        let request = identity.apply(self.client.get(url)).timeout(budget);
        let attempt = async {
            let response = request
                .send()
                .await
                .map_err(|e| FetchError::from_reqwest(url, timeout_ms, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::UpstreamNonOk {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let final_url = response.url().to_string();
            let html = response
                .text()
                .await
                .map_err(|e| FetchError::from_reqwest(url, timeout_ms, e))?;

            Ok(RetrievedPage {
                url: url.to_string(),
                html,
                final_url,
            })
        };

        match tokio::time::timeout(budget, attempt).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_ms,
            }),
        }
    }

    /// Fetch with the stealth identity, falling back once to the minimal
    /// identity when the first attempt fails without exhausting the budget
    pub async fn fetch_with_fallback(
        &self,
        url: &str,
        budget: Duration,
    ) -> Result<RetrievedPage, FetchError> {
        let deadline = Instant::now() + budget;

        match self.fetch(url, Identity::Stealth, budget).await {
            Ok(page) => Ok(page),
            Err(e @ FetchError::Timeout { .. })
            | Err(e @ FetchError::UnsafeUrl(_))
            | Err(e @ FetchError::InvalidUrl(_)) => Err(e),
            Err(e) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(FetchError::Timeout {
                        url: url.to_string(),
                        timeout_ms: budget.as_millis() as u64,
                    });
                }

                warn!("Stealth fetch failed for {}: {}, retrying minimal", url, e);
                let page = self.fetch(url, Identity::Minimal, remaining).await?;
                info!("Minimal identity succeeded for {}", url);
                Ok(page)
            }
        }
    }

    /// Fetch a content page using the configured content budget
    pub async fn fetch_content_page(&self, url: &str) -> Result<RetrievedPage, FetchError> {
        self.fetch_with_fallback(url, self.config.content_timeout())
            .await
    }

    /// Fetch a board listing page (stealth identity only)
    pub async fn fetch_listing(&self, url: &str) -> Result<RetrievedPage, FetchError> {
        self.fetch(url, Identity::Stealth, self.config.content_timeout())
            .await
    }

    fn check_url(&self, url: &str) -> Result<(), FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        if !["http", "https"].contains(&parsed.scheme()) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }
        if !self.config.allow_private_hosts && !Self::is_public_host(&parsed) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }
        Ok(())
    }

    /// Reject a domain that resolves into private space
    ///
    /// IP literals were already judged by `check_url`.
    async fn check_resolved(&self, url: &str) -> Result<(), FetchError> {
        if self.config.allow_private_hosts {
            return Ok(());
        }
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        let (host, port) = match (parsed.host(), parsed.port_or_known_default()) {
            (Some(Host::Domain(domain)), Some(port)) => (domain.to_string(), port),
            _ => return Ok(()),
        };

        let addrs = tokio::net::lookup_host((host.as_str(), port))
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                message: format!("DNS lookup for {} failed: {}", host, e),
            })?;

        for addr in addrs {
            if Self::is_private_ip(addr.ip()) {
                warn!("{} resolved to private address {}, blocking", host, addr.ip());
                return Err(FetchError::UnsafeUrl(url.to_string()));
            }
        }
        Ok(())
    }

    /// Whether a redirect hop may be followed
    ///
    /// Non-http schemes are always refused. Unless private hosts are
    /// allowed, the hop host must be public, and a domain is resolved
    /// (blocking, inside the redirect policy) and checked address by address.
    fn redirect_allowed(url: &Url, allow_private: bool) -> bool {
        if !["http", "https"].contains(&url.scheme()) {
            return false;
        }
        if allow_private {
            return true;
        }
        if !Self::is_public_host(url) {
            return false;
        }
        match (url.host(), url.port_or_known_default()) {
            (Some(Host::Domain(domain)), Some(port)) => match (domain, port).to_socket_addrs() {
                Ok(mut addrs) => !addrs.any(|addr| Self::is_private_ip(addr.ip())),
                Err(_) => false,
            },
            _ => true,
        }
    }

    /// Check if URL is safe to fetch (http/https, not localhost/private IP)
    pub fn is_safe_url(url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => {
                ["http", "https"].contains(&parsed.scheme()) && Self::is_public_host(&parsed)
            }
            Err(_) => false,
        }
    }

    fn is_public_host(url: &Url) -> bool {
        match url.host() {
            Some(Host::Domain(domain)) => {
                let domain = domain.trim_end_matches('.').to_lowercase();
                domain != "localhost" && !domain.ends_with(".localhost")
            }
            Some(Host::Ipv4(ip)) => !Self::is_private_v4(ip),
            Some(Host::Ipv6(ip)) => !Self::is_private_v6(ip),
            None => false,
        }
    }

    fn is_private_ip(ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(ip) => Self::is_private_v4(ip),
            IpAddr::V6(ip) => match ip.to_ipv4_mapped() {
                Some(mapped) => Self::is_private_v4(mapped),
                None => Self::is_private_v6(ip),
            },
        }
    }

    fn is_private_v4(ip: Ipv4Addr) -> bool {
        ip.is_loopback()
            || ip.is_private()
            || ip.is_link_local()
            || ip.is_unspecified()
            || ip.is_broadcast()
    }

    fn is_private_v6(ip: Ipv6Addr) -> bool {
        let first = ip.segments()[0];
        ip.is_loopback()
            || ip.is_unspecified()
            || (first & 0xfe00) == 0xfc00
            || (first & 0xffc0) == 0xfe80
    }

    /// Get the configuration
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }
}

#[async_trait]
impl RedirectProbe for PageRetriever {
    async fn final_url(&self, url: &str) -> Result<String, FetchError> {
        self.check_url(url)?;
        self.check_resolved(url).await?;

        let budget = self.config.probe_timeout();
        let timeout_ms = budget.as_millis() as u64;
        let request = Identity::Stealth
            .apply(self.client.get(url))
            .timeout(budget);

        let response = match tokio::time::timeout(budget, request.send()).await {
            Ok(result) => result.map_err(|e| FetchError::from_reqwest(url, timeout_ms, e))?,
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout_ms,
                })
            }
        };

        if !response.status().is_success() {
            return Err(FetchError::UpstreamNonOk {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.url().to_string())
    }
}
