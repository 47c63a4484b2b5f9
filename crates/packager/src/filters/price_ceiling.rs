//! Drops offerings that alone already exceed the budget ceiling.

use crate::error::Result;
use crate::request::PackageRequest;
use crate::traits::Filter;
use catalog::Offering;

/// Keeps offerings with `price <= budget * ceiling_factor`.
pub struct PriceCeilingFilter {
    ceiling_factor: f64,
}

impl PriceCeilingFilter {
    /// Create a new PriceCeilingFilter.
    ///
    /// # Arguments
    /// * `ceiling_factor` - Multiplier applied to the request budget (typically 1.2)
    pub fn new(ceiling_factor: f64) -> Self {
        Self { ceiling_factor }
    }
}

impl Filter for PriceCeilingFilter {
    fn name(&self) -> &str {
        "PriceCeilingFilter"
    }

    fn apply<'a>(
        &self,
        offerings: Vec<&'a Offering>,
        request: &PackageRequest,
    ) -> Result<Vec<&'a Offering>> {
        let ceiling = request.budget() * self.ceiling_factor;
        Ok(offerings
            .into_iter()
            .filter(|offering| offering.price <= ceiling)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_ceiling_is_inclusive() {
        let at_ceiling = Offering::new("dj", 100.0 * 1.2);
        let above = Offering::new("dj", 500.0);
        let below = Offering::new("dj", 80.0);

        let request = PackageRequest::new(["dj"], 100.0, "2024-06-01").unwrap();
        let filtered = PriceCeilingFilter::new(1.2)
            .apply(vec![&at_ceiling, &above, &below], &request)
            .unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].price, 100.0 * 1.2);
        assert_eq!(filtered[1].price, 80.0);
    }
}
