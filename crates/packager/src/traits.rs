//! Core trait for the offering filter stage.
//!
//! Filters decide, per request, which offerings of a category are bookable.
//! They are chained by [`FilterPipeline`](crate::FilterPipeline).

use crate::error::Result;
use crate::request::PackageRequest;
use catalog::Offering;

/// Narrows a list of offerings for one request.
///
/// - `Send + Sync` so a packager can serve concurrent requests
/// - Filters take the borrowed offerings by value and return the survivors
///   in their original order; they never reorder
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep only the offerings that pass this filter for `request`.
    fn apply<'a>(
        &self,
        offerings: Vec<&'a Offering>,
        request: &PackageRequest,
    ) -> Result<Vec<&'a Offering>>;
}
