// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML retrieval for job boards and posting pages
//!
//! ```text
//! URL → safety gate → stealth identity ──non-OK──→ minimal identity
//!                          │                             │
//!                          └──────── RetrievedPage ──────┘
//! ```
//!
//! Every request carries a hard wall-clock budget (15s for pages,
//! 7s for redirect probes). There is no third attempt.

pub mod config;
pub mod fetcher;
pub mod identity;
pub mod types;

pub use config::RetrieverConfig;
pub use fetcher::{PageRetriever, RedirectProbe};
pub use identity::Identity;
pub use types::{ErrorKind, FetchError, RetrievedPage};
