// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Heuristic requirement extraction on realistic postings

use fabstir_job_harvester::requirements::{extract_heuristic, RequirementsConfig, RequirementsExtractor, PLACEHOLDER};
use fabstir_job_harvester::retriever::{PageRetriever, RetrieverConfig};
use std::collections::HashSet;
use std::sync::Arc;

const CASHIER_POSTING: &str = r#"
<html><body>
  <nav><a href="/login">Sign in</a></nav>
  <div class="v-descrip">
    <h2>About the company</h2>
    <p>A leading grocery retailer with stores across KwaZulu-Natal.</p>
    <h3>Duties &amp; Responsibilities</h3>
    <ul>
      <li>Process customer payments accurately</li>
      <li>Balance the till at the end of each shift</li>
    </ul>
    <h3>Minimum Requirements</h3>
    <ul>
      <li>Matric / Grade 12</li>
      <li>One year cashier experience</li>
      <li>Share this job</li>
    </ul>
    <p><strong>Advantageous:</strong></p>
    <ul><li>Knowledge of point-of-sale systems</li></ul>
    <p>Click here to apply now</p>
  </div>
</body></html>
"#;

const DRIVER_POSTING: &str = r#"
<html><body>
  <div class="v-descrip">
    <ul>
      <li>Valid code 10 driver's licence</li>
      <li>Own reliable transport</li>
    </ul>
  </div>
</body></html>
"#;

fn extractor() -> RequirementsExtractor {
    let retriever = Arc::new(PageRetriever::new(RetrieverConfig::default()).unwrap());
    RequirementsExtractor::new(retriever, None, RequirementsConfig::default())
}

#[test]
fn test_sections_in_document_order() {
    let items = extract_heuristic(CASHIER_POSTING, &RequirementsConfig::default());
    assert_eq!(
        items,
        vec![
            "SECTION: [DUTIES] Duties & Responsibilities",
            "Process customer payments accurately",
            "Balance the till at the end of each shift",
            "SECTION: [REQUIRED] Minimum Requirements",
            "Matric / Grade 12",
            "One year cashier experience",
            "SECTION: [PREFERRED] Advantageous:",
            "Knowledge of point-of-sale systems",
        ]
    );
}

#[test]
fn test_requirements_scenario() {
    let html = r#"<div><h3>Requirements:</h3><ul><li>5 years Java</li><li>Matric certificate</li><li>Valid driver's licence</li></ul></div>"#;
    let items = extract_heuristic(html, &RequirementsConfig::default());
    assert_eq!(
        items,
        vec![
            "SECTION: [REQUIRED] Requirements:",
            "5 years Java",
            "Matric certificate",
            "Valid driver's licence",
        ]
    );
}

#[test]
fn test_low_yield_reads_board_selectors() {
    let items = extract_heuristic(DRIVER_POSTING, &RequirementsConfig::default());
    assert_eq!(items, vec!["Valid code 10 driver's licence", "Own reliable transport"]);
}

#[test]
fn test_output_is_unique_and_capped() {
    let lines: String = (0..40)
        .map(|i| format!("<li>Experience with system number {}</li><li>Experience with system number {}</li>", i, i))
        .collect();
    let html = format!("<html><body><h2>Skills required</h2><ul>{}</ul></body></html>", lines);

    let config = RequirementsConfig {
        section_walk_limit: 100,
        ..RequirementsConfig::default()
    };
    let items = extract_heuristic(&html, &config);
    assert_eq!(items.len(), config.max_items);
    let unique: HashSet<_> = items.iter().collect();
    assert_eq!(unique.len(), items.len());
}

#[tokio::test]
async fn test_never_empty() {
    let extractor = extractor();
    let pages = [
        "",
        "<html><body></body></html>",
        "<html><body><nav>Home | Jobs | Sign in</nav></body></html>",
        "<html><body><p>Great opportunity!</p></body></html>",
    ];
    for page in pages {
        assert_eq!(extractor.extract(page).await, vec![PLACEHOLDER.to_string()]);
    }
}

#[tokio::test]
async fn test_low_yield_without_generator_keeps_heuristic() {
    let items = extractor().extract(DRIVER_POSTING).await;
    assert_eq!(items.len(), 2);
    assert!(!extractor().has_generative_fallback());
}

#[tokio::test]
async fn test_unsafe_url_yields_placeholder() {
    let items = extractor()
        .extract_from_url("http://127.0.0.1:9/job")
        .await;
    assert_eq!(items, vec![PLACEHOLDER.to_string()]);
}
