// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Fabstir Job Harvester

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Full version string with feature description
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"), "-job-harvester");

/// Capabilities reported by `/v1/version`
pub const FEATURES: &[&str] = &[
    "board-search",
    "incremental-source-search",
    "content-extraction",
    "apply-link-resolution",
    "redirect-chase",
    "requirements-extraction",
    "generative-fallback",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Job Harvester {}", VERSION_NUMBER)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "features": FEATURES,
    })
}
