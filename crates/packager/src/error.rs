//! Error types for package construction.
//!
//! Every variant is an expected outcome for some combination of catalog,
//! categories, budget and date. None of them is transient, so callers should
//! report rather than retry.

use catalog::{Category, CatalogError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackagerError {
    /// The catalog holds no offerings at all
    #[error("Catalog contains no offerings")]
    EmptyCatalog,

    /// At least one requested category has nothing bookable within the ceiling
    #[error("No eligible offerings for categories: {}", .missing.join(", "))]
    NoEligibleOfferings { missing: Vec<Category> },

    /// Every category has candidates but no combination fits the ceiling
    #[error("No combination fits within the budget ceiling of {ceiling:.2}")]
    NoAffordableCombination { ceiling: f64 },

    /// The catalog provider failed before the packager could run
    #[error("Catalog provider failed: {0}")]
    UpstreamFailure(#[from] CatalogError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, PackagerError>;
