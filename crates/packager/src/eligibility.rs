//! Per-category candidate lists for one request.
//!
//! This is the output of the filter stage: for each requested category, in
//! request order, the offerings that are free on the date and within the
//! ceiling, in catalog order.

use crate::combinations::Combinations;
use crate::error::{PackagerError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::request::PackageRequest;
use catalog::{Catalog, Category, Offering};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EligibleOfferings<'a> {
    pools: Vec<(Category, Vec<&'a Offering>)>,
}

impl<'a> EligibleOfferings<'a> {
    /// Run `pipeline` over every requested category of `catalog`.
    ///
    /// Fails with `NoEligibleOfferings` naming every category left empty, so
    /// an unservable category is never confused with an over-budget request.
    pub fn collect(
        catalog: &'a Catalog,
        request: &PackageRequest,
        pipeline: &FilterPipeline,
    ) -> Result<Self> {
        let mut pools = Vec::with_capacity(request.categories().len());
        let mut missing = Vec::new();

        for category in request.categories() {
            let offerings = catalog.get_offerings_by_category(category);
            let total = offerings.len();
            let eligible = pipeline.apply(offerings, request)?;
            debug!(
                "Category {}: {} of {} offerings eligible",
                category,
                eligible.len(),
                total
            );

            if eligible.is_empty() {
                missing.push(category.clone());
            }
            pools.push((category.clone(), eligible));
        }

        if !missing.is_empty() {
            return Err(PackagerError::NoEligibleOfferings { missing });
        }

        Ok(Self { pools })
    }

    /// Candidates for `category`; empty if it was not requested
    pub fn candidates(&self, category: &str) -> &[&'a Offering] {
        self.pools
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, offerings)| offerings.as_slice())
            .unwrap_or(&[])
    }

    /// Requested categories with their candidate counts, in request order
    pub fn counts(&self) -> Vec<(&str, usize)> {
        self.pools
            .iter()
            .map(|(c, offerings)| (c.as_str(), offerings.len()))
            .collect()
    }

    /// Lazy cross-product of one candidate per category, in request order
    pub fn combinations(&self) -> Combinations<'_, 'a> {
        Combinations::new(
            self.pools
                .iter()
                .map(|(_, offerings)| offerings.as_slice())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AvailabilityFilter, PriceCeilingFilter};

    fn pipeline() -> FilterPipeline {
        FilterPipeline::new()
            .add_filter(AvailabilityFilter)
            .add_filter(PriceCeilingFilter::new(1.2))
    }

    #[test]
    fn test_collect_keeps_catalog_order() {
        let catalog = Catalog::from_offerings(vec![
            Offering::new("buffet", 300.0).with_id("x"),
            Offering::new("venue", 500.0).with_id("b"),
            Offering::new("venue", 400.0).with_id("a"),
            Offering::new("dj", 50.0).with_id("unrequested"),
        ]);
        let request = PackageRequest::new(["venue", "buffet"], 1000.0, "2024-06-01").unwrap();

        let eligible = EligibleOfferings::collect(&catalog, &request, &pipeline()).unwrap();

        let venues: Vec<_> = eligible
            .candidates("venue")
            .iter()
            .map(|o| o.id.as_deref().unwrap())
            .collect();
        assert_eq!(venues, vec!["b", "a"]);
        assert_eq!(eligible.counts(), vec![("venue", 2), ("buffet", 1)]);
        assert!(eligible.candidates("dj").is_empty());
    }

    #[test]
    fn test_collect_names_every_missing_category() {
        let catalog = Catalog::from_offerings(vec![
            Offering::new("venue", 400.0),
            Offering::new("dj", 5000.0),
        ]);
        let request =
            PackageRequest::new(["photography", "venue", "dj"], 1000.0, "2024-06-01").unwrap();

        let err = EligibleOfferings::collect(&catalog, &request, &pipeline()).unwrap_err();
        match err {
            PackagerError::NoEligibleOfferings { missing } => {
                assert_eq!(missing, vec!["photography".to_string(), "dj".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
