// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Requirement, duty and qualification extraction from posting pages

pub mod config;
pub mod extractor;
pub mod keywords;
pub mod sections;

pub use config::RequirementsConfig;
pub use extractor::{extract_heuristic, RequirementsExtractor, PLACEHOLDER};
pub use keywords::Category;
pub use sections::{Section, SectionCursor};
