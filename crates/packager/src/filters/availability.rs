//! Drops offerings already booked on the requested date.

use crate::error::Result;
use crate::request::PackageRequest;
use crate::traits::Filter;
use catalog::Offering;

/// Removes offerings whose booked dates contain the request date.
///
/// Dates are compared as exact strings, the same representation the catalog
/// stores them in.
pub struct AvailabilityFilter;

impl Filter for AvailabilityFilter {
    fn name(&self) -> &str {
        "AvailabilityFilter"
    }

    fn apply<'a>(
        &self,
        offerings: Vec<&'a Offering>,
        request: &PackageRequest,
    ) -> Result<Vec<&'a Offering>> {
        Ok(offerings
            .into_iter()
            .filter(|offering| !offering.is_booked_on(request.date()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_filter() {
        let free = Offering::new("venue", 400.0).with_id("a");
        let booked = Offering::new("venue", 500.0)
            .with_id("b")
            .with_booked_date("2024-06-01");
        let booked_elsewhere = Offering::new("venue", 450.0)
            .with_id("c")
            .with_booked_date("2024-07-01");

        let request = PackageRequest::new(["venue"], 1000.0, "2024-06-01").unwrap();
        let filtered = AvailabilityFilter
            .apply(vec![&free, &booked, &booked_elsewhere], &request)
            .unwrap();

        let ids: Vec<_> = filtered.iter().map(|o| o.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
