// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Canonical employer application URL resolution
//!
//! Priority: JobPosting structured data → anchor heuristics → redirect
//! chase for secondary aggregators → board-specific inline-script pattern.
//! Never yields a login page or the posting site's own domain.

pub mod candidates;
pub mod config;
pub mod resolver;

pub use config::ApplyLinkConfig;
pub use resolver::ApplyLinkResolver;
