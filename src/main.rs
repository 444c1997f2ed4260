// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use fabstir_job_harvester::{
    api::{start_server, AppState},
    config::HarvesterConfig,
    version,
};
use std::env;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting {}...\n", version::get_version_string());

    let config = HarvesterConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;

    let sources: Vec<String> = config.jobs.sources.iter().map(|b| b.to_string()).collect();
    println!("🔎 Job sources: {}", sources.join(", "));
    println!(
        "⏱️  Content budget: {}s, redirect probe: {}s",
        config.retriever.content_timeout_secs, config.retriever.probe_timeout_secs
    );
    println!(
        "🤖 Generative fallback: {}",
        if config.generative.is_enabled() {
            config.generative.model.as_str()
        } else {
            "disabled"
        }
    );

    let state = AppState::from_config(&config)?;
    let server_config = config.server.clone();
    let server_handle = tokio::spawn(async move { start_server(&server_config, state).await });

    println!(
        "\n🌐 API: http://{}:{}  (Ctrl+C to shutdown)\n",
        config.server.host, config.server.port
    );

    tokio::select! {
        result = server_handle => {
            result??;
        }
        _ = signal::ctrl_c() => {
            println!("\n⏹️  Shutting down...");
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}
