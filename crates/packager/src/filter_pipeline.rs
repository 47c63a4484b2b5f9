//! The FilterPipeline chains offering filters.

use crate::error::Result;
use crate::request::PackageRequest;
use crate::traits::Filter;
use catalog::Offering;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AvailabilityFilter)
///     .add_filter(PriceCeilingFilter::new(1.2));
///
/// let eligible = pipeline.apply(venues, &request)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the offerings.
    ///
    /// Order of the surviving offerings is the input order.
    pub fn apply<'a>(
        &self,
        offerings: Vec<&'a Offering>,
        request: &PackageRequest,
    ) -> Result<Vec<&'a Offering>> {
        let mut current = offerings;
        for filter in &self.filters {
            let input_count = current.len();
            current = filter.apply(current, request)?;
            debug!(
                "Filter applied: {} ({} -> {})",
                filter.name(),
                input_count,
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
