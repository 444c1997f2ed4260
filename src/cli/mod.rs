// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::api::AppState;
use crate::config::HarvesterConfig;

/// Fabstir Job Harvester CLI
#[derive(Parser, Debug)]
#[command(name = "job-harvester-cli")]
#[command(version)]
#[command(about = "Search job boards and extract posting details", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search job boards for a query
    Search(SearchArgs),

    /// Extract a posting's main content and direct apply link
    Content(UrlArgs),

    /// Extract a posting's requirement lines
    Requirements(UrlArgs),
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search keywords
    pub query: String,

    /// Only query this source (e.g. careers24, pnet, careerjunction, indeed)
    #[arg(long)]
    pub source: Option<String>,
}

/// Arguments for commands that take a posting URL
#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Posting URL
    pub url: String,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = HarvesterConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;
    let state = AppState::from_config(&config)?;

    match cli.command {
        Commands::Search(args) => {
            let jobs = match args.source.as_deref() {
                Some(source) => state.job_search.search_one(&args.query, source).await?,
                None => state.job_search.search_all(&args.query).await?,
            };
            print_json(&serde_json::json!({ "jobs": jobs }))
        }
        Commands::Content(args) => {
            let result = state.content.resolve(&args.url).await?;
            print_json(&result)
        }
        Commands::Requirements(args) => {
            let requirements = state.requirements.extract_from_url(&args.url).await;
            print_json(&serde_json::json!({ "requirements": requirements }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
