// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Job board search
//!
//! Provides job summaries for a query by scraping several boards that
//! share no API:
//! - One data-driven adapter per board (`boards::SiteProfile`)
//! - Concurrent fan-out with per-source failure isolation
//! - Single-source mode for progressive client-side loading

pub mod boards;
pub mod config;
pub mod parser;
pub mod provider;
pub mod service;
pub mod types;

pub use boards::{JobBoard, SiteProfile};
pub use config::JobSearchConfig;
pub use provider::{BoardAdapter, JobSource};
pub use service::JobSearchService;
pub use types::{JobSearchError, JobSummary};
