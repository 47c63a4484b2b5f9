//! # Package Orchestrator
//!
//! Coordinates a single recommendation:
//! 1. Fetch a catalog snapshot from the provider
//! 2. Run the packager on it (CPU-bound, off the async executor)
//! 3. Map the outcome into the response envelope
//!
//! The orchestrator is cheap to clone; every clone shares the provider and
//! the packager's filter pipeline.

use std::sync::Arc;
use std::time::Instant;

use catalog::{Catalog, CatalogError, CatalogProvider};
use packager::{Package, PackageRequest, Packager, PackagerConfig, PackagerError};
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::envelope::{RecommendRequest, RecommendResponse};

#[derive(Clone)]
pub struct PackageOrchestrator {
    provider: Arc<dyn CatalogProvider>,
    packager: Packager,
}

impl PackageOrchestrator {
    pub fn new(provider: Arc<dyn CatalogProvider>, config: PackagerConfig) -> Self {
        info!("Orchestrator using catalog provider: {}", provider.name());
        Self {
            provider,
            packager: Packager::new(config),
        }
    }

    pub fn packager(&self) -> &Packager {
        &self.packager
    }

    /// Main entry point: get packages for a validated request
    ///
    /// # Errors
    /// Every packager error, plus `UpstreamFailure` when the provider
    /// cannot produce a snapshot.
    pub async fn get_packages(&self, request: PackageRequest) -> Result<Vec<Package>, PackagerError> {
        let start_time = Instant::now();

        let catalog = self.fetch_catalog().await?;
        info!(
            "Fetched catalog: {} offerings in {} categories",
            catalog.len(),
            catalog.categories().len()
        );

        let packages = tokio::task::spawn_blocking({
            let packager = self.packager.clone();
            move || packager.recommend(&catalog, &request)
        })
        .await
        .map_err(|e| join_failure("packager", e))??;

        info!(
            "Recommendation completed in {:?} ({} packages)",
            start_time.elapsed(),
            packages.len()
        );

        Ok(packages)
    }

    /// Transport entry point: validate the wire request, recommend, and wrap
    /// the outcome in the response envelope
    pub async fn handle(&self, request: RecommendRequest) -> RecommendResponse {
        let result = match request.into_package_request() {
            Ok(request) => self.get_packages(request).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            warn!("Recommendation failed: {}", e);
        }

        RecommendResponse::from_result(result)
    }

    /// Providers may block on disk or network, so they run on the blocking pool
    async fn fetch_catalog(&self) -> Result<Arc<Catalog>, PackagerError> {
        let provider = Arc::clone(&self.provider);
        let catalog = tokio::task::spawn_blocking(move || provider.fetch())
            .await
            .map_err(|e| join_failure("catalog fetch", e))??;
        Ok(catalog)
    }
}

/// A panic in a blocking task is a bug and keeps unwinding; a cancelled task
/// means the runtime is going away and is reported as an upstream failure.
fn join_failure(task: &str, err: JoinError) -> PackagerError {
    if err.is_panic() {
        std::panic::resume_unwind(err.into_panic());
    }
    PackagerError::UpstreamFailure(CatalogError::Unavailable(format!(
        "{task} task cancelled"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::ErrorCode;
    use catalog::{Offering, StaticCatalogProvider};

    struct FailingProvider;

    impl CatalogProvider for FailingProvider {
        fn name(&self) -> &str {
            "FailingProvider"
        }

        fn fetch(&self) -> catalog::Result<Arc<Catalog>> {
            Err(CatalogError::Unavailable("connection refused".to_string()))
        }
    }

    fn orchestrator_for(offerings: Vec<Offering>) -> PackageOrchestrator {
        let catalog = Arc::new(Catalog::from_offerings(offerings));
        PackageOrchestrator::new(
            Arc::new(StaticCatalogProvider::new(catalog)),
            PackagerConfig::default(),
        )
    }

    fn wedding_request() -> RecommendRequest {
        RecommendRequest {
            categories: vec!["venue".to_string(), "catering".to_string()],
            budget: 1000.0,
            date: "2024-06-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_packages() {
        let orchestrator = orchestrator_for(vec![
            Offering::new("venue", 400.0).with_id("A").with_rating(4.0),
            Offering::new("venue", 500.0)
                .with_id("B")
                .with_rating(5.0)
                .with_booked_date("2024-06-01"),
            Offering::new("catering", 300.0).with_id("X").with_rating(3.0),
        ]);

        let request = wedding_request().into_package_request().unwrap();
        let packages = orchestrator.get_packages(request).await.unwrap();

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].total_price, 700.0);
        assert_eq!(packages[0].score, 3.5);
    }

    #[tokio::test]
    async fn test_provider_failure_is_upstream_failure() {
        let orchestrator =
            PackageOrchestrator::new(Arc::new(FailingProvider), PackagerConfig::default());

        let request = wedding_request().into_package_request().unwrap();
        let err = orchestrator.get_packages(request).await.unwrap_err();
        assert!(matches!(err, PackagerError::UpstreamFailure(_)));

        match orchestrator.handle(wedding_request()).await {
            RecommendResponse::Error { error } => {
                assert_eq!(error.code, ErrorCode::UpstreamFailure);
                assert!(!error.message.contains("connection refused"));
            }
            other => panic!("expected error response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_empty_catalog() {
        let orchestrator = orchestrator_for(vec![]);

        match orchestrator.handle(wedding_request()).await {
            RecommendResponse::Error { error } => assert_eq!(error.code, ErrorCode::EmptyCatalog),
            other => panic!("expected error response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_invalid_request() {
        let orchestrator = orchestrator_for(vec![Offering::new("venue", 100.0)]);
        let mut request = wedding_request();
        request.budget = -5.0;

        match orchestrator.handle(request).await {
            RecommendResponse::Error { error } => {
                assert_eq!(error.code, ErrorCode::InvalidRequest)
            }
            other => panic!("expected error response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_orchestrator() {
        let orchestrator = orchestrator_for(
            (0..5)
                .flat_map(|i| {
                    [
                        Offering::new("venue", 100.0 + i as f64 * 50.0),
                        Offering::new("catering", 80.0 + i as f64 * 20.0),
                    ]
                })
                .collect(),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let orchestrator = orchestrator.clone();
                tokio::spawn(async move { orchestrator.handle(wedding_request()).await })
            })
            .collect();

        let mut responses = Vec::new();
        for handle in handles {
            responses.push(handle.await.unwrap());
        }

        assert!(responses.iter().all(|r| !r.is_error()));
        assert!(responses.windows(2).all(|w| w[0] == w[1]));
    }
}
