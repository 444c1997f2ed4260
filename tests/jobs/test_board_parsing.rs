// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Listing page parsing for every registered board

use fabstir_job_harvester::jobs::parser::parse_listing;
use fabstir_job_harvester::jobs::JobBoard;
use url::Url;

const TS: i64 = 1_700_000_000_000;

const CAREERS24_HTML: &str = r#"
<html><body>
  <div class="job-card">
    <h2><a href="/jobs/adverts/2101-cashier-durban/">Cashier</a></h2>
    <span class="job-card-company">Shoprite</span>
    <span class="job-card-location">Durban</span>
    <span class="posted-date">Posted today</span>
  </div>
  <div class="job-card">
    <h2><a href="/jobs/adverts/2102-stock-controller/">Stock Controller</a></h2>
    <span class="job-card-company">Pick n Pay</span>
  </div>
  <div class="job-card"><span>Sponsored banner without a title</span></div>
</body></html>
"#;

const CAREER_JUNCTION_HTML: &str = r#"
<html><body>
  <div class="module job-result">
    <div class="job-result-title">
      <h2><a href="/jobs/view/8841">Financial Accountant</a></h2>
      <h3><a href="/companies/acme">Acme Holdings</a></h3>
    </div>
    <ul class="job-result-overview"><li class="location">Sandton</li></ul>
    <span class="updated-time">Updated 1 day ago</span>
  </div>
</body></html>
"#;

fn indeed_html(cards: usize) -> String {
    let cards: String = (0..cards)
        .map(|i| {
            format!(
                r#"<div class="job_seen_beacon">
                     <h2 class="jobTitle"><a class="jcs-JobTitle" href="/rc/clk?jk=job{i}"><span title="Data Analyst {i}">Data Analyst {i}</span></a></h2>
                     <span data-testid="company-name">Beta Analytics</span>
                     <div data-testid="text-location">Johannesburg</div>
                   </div>"#,
                i = i
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", cards)
}

#[test]
fn test_careers24_cards() {
    let profile = JobBoard::Careers24.profile();
    let jobs = parse_listing(profile, CAREERS24_HTML, profile.default_cap, 150, TS);

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].title, "Cashier");
    assert_eq!(jobs[0].company, "Shoprite");
    assert_eq!(jobs[0].location, "Durban");
    assert_eq!(jobs[0].posted_label.as_deref(), Some("Posted today"));
    assert_eq!(
        jobs[0].link,
        "https://www.careers24.com/jobs/adverts/2101-cashier-durban/"
    );
    assert_eq!(jobs[0].source, "careers24");
    assert_eq!(jobs[1].location, "");
    assert_ne!(jobs[0].id, jobs[1].id);
}

#[test]
fn test_career_junction_cards() {
    let profile = JobBoard::CareerJunction.profile();
    let jobs = parse_listing(profile, CAREER_JUNCTION_HTML, profile.default_cap, 150, TS);

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "Financial Accountant");
    assert_eq!(jobs[0].company, "Acme Holdings");
    assert_eq!(jobs[0].location, "Sandton");
    assert_eq!(jobs[0].link, "https://www.careerjunction.co.za/jobs/view/8841");
}

#[test]
fn test_indeed_capped_at_three() {
    let profile = JobBoard::Indeed.profile();
    let jobs = parse_listing(profile, &indeed_html(6), profile.default_cap, 150, TS);

    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[0].title, "Data Analyst 0");
    assert_eq!(jobs[2].link, "https://za.indeed.com/rc/clk?jk=job2");
}

#[test]
fn test_malformed_or_empty_input_yields_nothing() {
    let inputs = [
        "",
        "<html>",
        "not html at all <<<>>>",
        "<html><body><div class='job-card'></div></body></html>",
        "<html><body><article data-at='job-item'><h2>No link here</h2></article></body></html>",
    ];
    for board in JobBoard::ALL {
        let profile = board.profile();
        for input in inputs {
            let jobs = parse_listing(profile, input, profile.default_cap, 150, TS);
            assert!(jobs.is_empty(), "{} produced jobs for {:?}", board, input);
        }
    }
}

#[test]
fn test_titles_non_empty_and_links_absolute() {
    let samples = [
        (JobBoard::Careers24, CAREERS24_HTML.to_string()),
        (JobBoard::CareerJunction, CAREER_JUNCTION_HTML.to_string()),
        (JobBoard::Indeed, indeed_html(3)),
    ];
    for (board, html) in samples {
        let profile = board.profile();
        for job in parse_listing(profile, &html, profile.default_cap, 150, TS) {
            assert!(!job.title.is_empty());
            let link = Url::parse(&job.link).expect("absolute link");
            assert!(matches!(link.scheme(), "http" | "https"));
        }
    }
}
