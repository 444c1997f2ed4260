// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod apply_link;
pub mod cli;
pub mod config;
pub mod content;
pub mod dom;
pub mod jobs;
pub mod llm;
pub mod requirements;
pub mod retriever;
pub mod version;

// Re-export main types
pub use apply_link::{ApplyLinkConfig, ApplyLinkResolver};
pub use config::HarvesterConfig;
pub use content::{ContentError, ContentExtractionResult, ContentResolver};
pub use jobs::{JobBoard, JobSearchError, JobSearchService, JobSource, JobSummary};
pub use llm::{GenerativeTextClient, TextGenerator};
pub use requirements::{RequirementsConfig, RequirementsExtractor};
pub use retriever::{ErrorKind, FetchError, PageRetriever, RetrieverConfig};
