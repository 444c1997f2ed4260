// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Aggregate runtime configuration
//!
//! Each component owns its config struct; this module loads them together
//! from the environment (after `dotenv`) and validates the set.

use std::env;
use std::net::SocketAddr;

use crate::apply_link::ApplyLinkConfig;
use crate::content::ContentConfig;
use crate::jobs::JobSearchConfig;
use crate::llm::GenerativeConfig;
use crate::requirements::RequirementsConfig;
use crate::retriever::RetrieverConfig;

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: 127.0.0.1)
    pub host: String,
    /// Bind port (default: 8080)
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("API_HOST").unwrap_or(defaults.host),
            port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("invalid API_HOST/API_PORT {}:{}: {}", self.host, self.port, e))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Configuration for every component of the harvester
#[derive(Debug, Clone, Default)]
pub struct HarvesterConfig {
    pub retriever: RetrieverConfig,
    pub jobs: JobSearchConfig,
    pub apply_links: ApplyLinkConfig,
    pub content: ContentConfig,
    pub requirements: RequirementsConfig,
    pub generative: GenerativeConfig,
    pub server: ServerConfig,
}

impl HarvesterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            retriever: RetrieverConfig::from_env(),
            jobs: JobSearchConfig::from_env(),
            apply_links: ApplyLinkConfig::from_env(),
            content: ContentConfig::from_env(),
            requirements: RequirementsConfig::from_env(),
            generative: GenerativeConfig::from_env(),
            server: ServerConfig::from_env(),
        }
    }

    /// Validate every component configuration
    pub fn validate(&self) -> Result<(), String> {
        self.retriever.validate()?;
        self.jobs.validate()?;
        self.apply_links.validate()?;
        self.content.validate()?;
        self.requirements.validate()?;
        self.generative.validate()?;
        self.server.validate()?;
        Ok(())
    }
}
