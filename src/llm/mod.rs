// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generative text service used as the requirements fallback

pub mod client;
pub mod config;

pub use client::{parse_json_list, GenerativeTextClient, LlmError, TextGenerator};
pub use config::GenerativeConfig;
