// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Posting content resolution
//!
//! Fetches a posting page, resolves its direct apply link from the raw
//! markup, strips page chrome and returns the main description block.

pub mod cleaner;
pub mod config;
pub mod extractor;
pub mod resolver;
pub mod types;

pub use config::ContentConfig;
pub use extractor::extract_content;
pub use resolver::ContentResolver;
pub use types::{ContentError, ContentExtractionResult};
