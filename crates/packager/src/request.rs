//! The client's package request.

use crate::error::{PackagerError, Result};
use catalog::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Required categories (ordered, no duplicates), budget and event date.
///
/// `new` validates; a request that arrives through serde should be checked
/// with `validate` before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRequest {
    categories: Vec<Category>,
    budget: f64,
    date: String,
}

impl PackageRequest {
    pub fn new<I, S>(categories: I, budget: f64, date: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Category>,
    {
        let request = Self {
            categories: categories.into_iter().map(Into::into).collect(),
            budget,
            date: date.into(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(PackagerError::InvalidRequest(
                "at least one category is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.trim().is_empty() {
                return Err(PackagerError::InvalidRequest(
                    "category names must not be blank".to_string(),
                ));
            }
            if !seen.insert(category.as_str()) {
                return Err(PackagerError::InvalidRequest(format!(
                    "category {category} requested twice"
                )));
            }
        }

        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(PackagerError::InvalidRequest(format!(
                "budget must be a positive number, got {}",
                self.budget
            )));
        }

        if self.date.trim().is_empty() {
            return Err(PackagerError::InvalidRequest("date is required".to_string()));
        }

        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Position of `category` in the request, if requested
    pub fn position(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }
}
