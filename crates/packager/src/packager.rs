//! The Packager ties the stages together.
//!
//! ```text
//! catalog ──► filter ──► combinations ──► rank ──► select/fallback ──► packages
//! ```
//!
//! Each call works on its own borrowed snapshot and allocates only local
//! state, so one `Packager` can be shared across threads.

use crate::config::PackagerConfig;
use crate::eligibility::EligibleOfferings;
use crate::error::{PackagerError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AvailabilityFilter, PriceCeilingFilter};
use crate::ranking::rank_combinations;
use crate::request::PackageRequest;
use crate::selection::{Package, select_packages};
use catalog::Catalog;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct Packager {
    config: PackagerConfig,
    filter_pipeline: Arc<FilterPipeline>,
}

impl Packager {
    /// Create a packager with the availability and price-ceiling filters
    pub fn new(config: PackagerConfig) -> Self {
        let filter_pipeline = Arc::new(
            FilterPipeline::new()
                .add_filter(AvailabilityFilter)
                .add_filter(PriceCeilingFilter::new(config.ceiling_factor)),
        );
        Self {
            config,
            filter_pipeline,
        }
    }

    pub fn config(&self) -> &PackagerConfig {
        &self.config
    }

    /// Recommend up to `package_quota` packages for `request` from `catalog`.
    ///
    /// # Errors
    /// * `InvalidRequest` - the request fails validation
    /// * `EmptyCatalog` - the catalog has no offerings
    /// * `NoEligibleOfferings` - some category has nothing bookable under the ceiling
    /// * `NoAffordableCombination` - no combination fits under the ceiling
    #[instrument(
        skip_all,
        fields(
            categories = ?request.categories(),
            budget = request.budget(),
            date = %request.date()
        )
    )]
    pub fn recommend(&self, catalog: &Catalog, request: &PackageRequest) -> Result<Vec<Package>> {
        request.validate()?;

        if catalog.is_empty() {
            return Err(PackagerError::EmptyCatalog);
        }

        let ceiling = self.config.budget_ceiling(request.budget());

        // Stage 1: per-category eligibility
        let eligible = EligibleOfferings::collect(catalog, request, &self.filter_pipeline)?;
        debug!("Eligible offerings per category: {:?}", eligible.counts());

        // Stage 2 + 3: stream the product through the ranker
        let outcome = rank_combinations(
            eligible.combinations(),
            ceiling,
            self.config.package_quota,
        );
        debug!(
            "Combinations generated: {}, within ceiling {:.2}: {}",
            outcome.generated, ceiling, outcome.affordable
        );

        if outcome.ranked.is_empty() {
            return Err(PackagerError::NoAffordableCombination { ceiling });
        }

        // Stage 4: primaries, then fallbacks
        let packages = select_packages(&outcome.ranked, &eligible, request, &self.config);
        let fallbacks = packages.iter().filter(|p| p.is_fallback()).count();
        info!(
            "Selected {} packages ({} primary, {} fallback)",
            packages.len(),
            packages.len() - fallbacks,
            fallbacks
        );

        Ok(packages)
    }
}

impl Default for Packager {
    fn default() -> Self {
        Self::new(PackagerConfig::default())
    }
}
