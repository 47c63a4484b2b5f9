//! Core domain types for the service catalog.
//!
//! An [`Offering`] is one bookable service (a venue, a buffet, a
//! photographer...). The [`Catalog`] owns a snapshot of offerings and keeps a
//! per-category index over them so the packager never scans offerings from
//! categories nobody asked for.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Service category name, e.g. "venue", "buffet", "photography"
pub type Category = String;

/// Position of an offering inside its catalog snapshot
pub type OfferingIndex = usize;

// =============================================================================
// Offering
// =============================================================================

/// A single bookable service record.
///
/// Field names follow the camelCase keys used by the service store, so a
/// catalog exported from it deserializes without a mapping layer. Unknown keys
/// (images, location, reviews...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, alias = "serviceName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Records without a category load fine but never match a request
    #[serde(default)]
    pub category: Category,

    pub price: f64,

    /// Average review rating, 0.0 to 5.0. `None` counts as 0 when scoring.
    #[serde(default)]
    pub rating: Option<f64>,

    /// Dates (verbatim strings, e.g. "2024-06-01") on which this service is taken
    #[serde(default)]
    pub booked_dates: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl Offering {
    /// Create an offering with no rating and no booked dates
    pub fn new(category: impl Into<Category>, price: f64) -> Self {
        Self {
            id: None,
            name: None,
            category: category.into(),
            price,
            rating: None,
            booked_dates: BTreeSet::new(),
            company_name: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_booked_date(mut self, date: impl Into<String>) -> Self {
        self.booked_dates.insert(date.into());
        self
    }

    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    /// Rating used for scoring; a missing rating is a zero, never a gap
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// True if the service is already booked on `date`
    pub fn is_booked_on(&self, date: &str) -> bool {
        self.booked_dates.contains(date)
    }

    /// Human-readable label: name, else id, else the category
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or(&self.category)
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Precomputed statistics for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub offering_count: u32,
    pub min_price: f64,
    pub max_price: f64,
    /// Mean of `rating_or_zero()` across the category
    pub avg_rating: f64,
}

// =============================================================================
// Catalog - the read-only snapshot handed to the packager
// =============================================================================

/// A materialized snapshot of every offering plus a category index.
///
/// Offerings keep their insertion order; the category index stores positions
/// into `offerings` in that same order, which is the order the packager
/// enumerates candidates in.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) offerings: Vec<Offering>,
    pub(crate) category_index: HashMap<Category, Vec<OfferingIndex>>,
    pub(crate) category_stats: HashMap<Category, CategoryStats>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            offerings: Vec::new(),
            category_index: HashMap::new(),
            category_stats: HashMap::new(),
        }
    }

    /// Build a catalog (index and statistics included) from parsed offerings
    pub fn from_offerings(offerings: Vec<Offering>) -> Self {
        let mut catalog = Self::new();
        for offering in offerings {
            catalog.insert_offering(offering);
        }
        catalog.compute_category_stats();
        catalog
    }

    /// All offerings in insertion order
    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    pub fn get_offering(&self, index: OfferingIndex) -> Option<&Offering> {
        self.offerings.get(index)
    }

    /// Offerings of one category, in insertion order
    pub fn get_offerings_by_category(&self, category: &str) -> Vec<&Offering> {
        self.category_index
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.offerings[idx])
            .collect()
    }

    /// Category names, sorted for stable display
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.category_index.keys().map(|c| c.as_str()).collect();
        categories.sort_unstable();
        categories
    }

    pub fn get_category_stats(&self, category: &str) -> Option<&CategoryStats> {
        self.category_stats.get(category)
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Insert an offering and update the category index.
    ///
    /// Statistics are not refreshed here; call `compute_category_stats` once
    /// after a batch of inserts.
    pub fn insert_offering(&mut self, offering: Offering) {
        let idx = self.offerings.len();
        self.category_index
            .entry(offering.category.clone())
            .or_default()
            .push(idx);
        self.offerings.push(offering);
    }

    /// Get counts for debugging/validation: (offerings, categories)
    pub fn counts(&self) -> (usize, usize) {
        (self.offerings.len(), self.category_index.len())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
