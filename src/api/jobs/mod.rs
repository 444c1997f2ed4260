// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Job posting API endpoints
//!
//! Provides `/v1/jobs/search`, `/v1/jobs/content`, `/v1/jobs/requirements`
//! and `/v1/jobs/sources`.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{content_handler, requirements_handler, search_handler, sources_handler};
pub use request::{ContentApiRequest, JobSearchApiRequest, RequirementsQuery};
pub use response::{
    HealthResponse, JobSearchApiResponse, RequirementsApiResponse, SourceInfo, SourcesApiResponse,
};
