// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fetch orchestrator behaviour over mocked sources

use async_trait::async_trait;
use fabstir_job_harvester::jobs::{JobSearchError, JobSearchService, JobSource, JobSummary};
use fabstir_job_harvester::retriever::FetchError;
use mockall::mock;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

mock! {
    pub Source {}

    #[async_trait]
    impl JobSource for Source {
        fn id(&self) -> &'static str;
        async fn search(&self, query: &str) -> Result<Vec<JobSummary>, JobSearchError>;
    }
}

fn job(source: &str, n: usize) -> JobSummary {
    JobSummary {
        id: JobSummary::make_id(source, 1, n),
        title: format!("{} job {}", source, n),
        company: "Acme".to_string(),
        location: "Cape Town".to_string(),
        link: format!("https://{}.example/jobs/{}", source, n),
        source: source.to_string(),
        posted_label: None,
    }
}

fn returning(id: &'static str, count: usize) -> MockSource {
    let mut source = MockSource::new();
    source.expect_id().return_const(id);
    source
        .expect_search()
        .times(1)
        .returning(move |_| Ok((0..count).map(|n| job(id, n)).collect()));
    source
}

fn failing(id: &'static str) -> MockSource {
    let mut source = MockSource::new();
    source.expect_id().return_const(id);
    source.expect_search().times(1).returning(move |_| {
        Err(JobSearchError::Fetch(FetchError::UpstreamNonOk {
            status: 503,
            url: format!("https://{}.example/search", id),
        }))
    });
    source
}

fn untouched(id: &'static str) -> MockSource {
    let mut source = MockSource::new();
    source.expect_id().return_const(id);
    source.expect_search().times(0);
    source
}

fn service(sources: Vec<MockSource>) -> JobSearchService {
    JobSearchService::with_sources(
        sources
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn JobSource>)
            .collect(),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn test_one_failing_source_of_four_still_yields_six() {
    let service = service(vec![
        returning("alpha", 2),
        failing("beta"),
        returning("gamma", 2),
        returning("delta", 2),
    ]);

    let jobs = assert_ok!(service.search_all("cashier").await);
    assert_eq!(jobs.len(), 6);
    assert!(jobs.iter().all(|j| j.source != "beta"));
}

#[tokio::test]
async fn test_all_sources_failing_yields_empty_not_error() {
    let service = service(vec![failing("alpha"), failing("beta")]);
    let jobs = assert_ok!(service.search_all("cashier").await);
    assert!(jobs.is_empty());
}

#[tokio::test]
async fn test_search_one_queries_only_that_source() {
    let service = service(vec![untouched("alpha"), returning("beta", 2), untouched("gamma")]);

    let jobs = service.search_one("cashier", "beta").await.unwrap();
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j.source == "beta"));
}

#[tokio::test]
async fn test_search_one_unknown_source_is_error() {
    let service = service(vec![untouched("alpha")]);
    let error = assert_err!(service.search_one("cashier", "monster").await);
    assert!(matches!(error, JobSearchError::UnknownSource { .. }));
}

#[tokio::test]
async fn test_invalid_query_never_reaches_sources() {
    let service = service(vec![untouched("alpha"), untouched("beta")]);

    let result = service.search_all("   ").await;
    assert!(matches!(result, Err(JobSearchError::InvalidQuery { .. })));

    let result = service.search_one(&"x".repeat(201), "alpha").await;
    assert!(matches!(result, Err(JobSearchError::InvalidQuery { .. })));
}

#[tokio::test]
async fn test_query_is_trimmed_before_sources_see_it() {
    let mut source = MockSource::new();
    source.expect_id().return_const("alpha");
    source
        .expect_search()
        .withf(|query| query.to_string() == "data analyst")
        .times(1)
        .returning(|_| Ok(vec![job("alpha", 0)]));

    let service = service(vec![source]);
    let jobs = service.search_all("  data analyst  ").await.unwrap();
    assert_eq!(jobs.len(), 1);
}

#[tokio::test]
async fn test_available_sources_in_registration_order() {
    let service = service(vec![untouched("alpha"), untouched("beta"), untouched("gamma")]);
    assert_eq!(service.available_sources(), vec!["alpha", "beta", "gamma"]);
}
