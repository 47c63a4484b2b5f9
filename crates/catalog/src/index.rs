//! Catalog building, statistics and validation.
//!
//! Loading goes parse -> index -> statistics -> validate. Statistics are
//! computed per category in parallel with Rayon; the packager itself never
//! needs them, they feed the category overview.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

impl Catalog {
    /// Load a catalog snapshot from a JSON or JSON-lines file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        debug!("Loading catalog from {:?}", path);

        let offerings = parser::parse_catalog_file(path)?;
        let catalog = Catalog::from_offerings(offerings);
        catalog.validate()?;

        let (offerings, categories) = catalog.counts();
        info!(
            "Loaded {} offerings across {} categories from {}",
            offerings,
            categories,
            path.display()
        );
        Ok(catalog)
    }

    /// Compute aggregate statistics for every category
    pub fn compute_category_stats(&mut self) {
        let offerings = &self.offerings;
        self.category_stats = self
            .category_index
            .par_iter()
            .map(|(category, indices)| {
                let offering_count = indices.len() as u32;
                let mut min_price = f64::INFINITY;
                let mut max_price = f64::NEG_INFINITY;
                let mut rating_total = 0.0;

                for &idx in indices {
                    let offering = &offerings[idx];
                    min_price = min_price.min(offering.price);
                    max_price = max_price.max(offering.price);
                    rating_total += offering.rating_or_zero();
                }

                let avg_rating = if offering_count > 0 {
                    rating_total / offering_count as f64
                } else {
                    0.0
                };

                (
                    category.clone(),
                    CategoryStats {
                        offering_count,
                        min_price,
                        max_price,
                        avg_rating,
                    },
                )
            })
            .collect();
    }

    /// Validate data integrity
    ///
    /// Check that every price is finite and non-negative. Ratings are scored
    /// as stored; one outside 0.0 - 5.0 is only reported.
    pub fn validate(&self) -> Result<()> {
        for offering in &self.offerings {
            if !offering.price.is_finite() || offering.price < 0.0 {
                return Err(CatalogError::InvalidValue {
                    field: "price".to_string(),
                    value: format!("{} ({})", offering.price, offering.display_name()),
                });
            }
            if let Some(rating) = offering.rating.filter(|r| !(0.0..=5.0).contains(r)) {
                warn!(
                    "Rating {} outside 0-5 for {}",
                    rating,
                    offering.display_name()
                );
            }
        }
        Ok(())
    }
}
