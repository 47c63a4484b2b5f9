//! Test harness for the package orchestrator.
//!
//! Loads a catalog file and prints the response envelope for a sample
//! request. Usage: `server [catalog-path]` (defaults to data/catalog.json).

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::FileCatalogProvider;
use packager::PackagerConfig;
use server::{PackageOrchestrator, RecommendRequest};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,packager=debug")),
        )
        .init();

    info!("Starting event packager test harness");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/catalog.json".to_string());
    let provider = Arc::new(FileCatalogProvider::new(&path));
    let orchestrator = PackageOrchestrator::new(provider, PackagerConfig::default());

    let request = RecommendRequest {
        categories: vec![
            "venue".to_string(),
            "buffet".to_string(),
            "photography".to_string(),
        ],
        budget: 2500.0,
        date: "2024-06-15".to_string(),
    };
    info!(
        "Requesting packages for {:?} (budget: {:.2}, date: {})",
        request.categories, request.budget, request.date
    );

    let response = orchestrator.handle(request).await;
    let json = response
        .to_json()
        .context("Failed to serialize response")?;
    println!("{json}");

    Ok(())
}
