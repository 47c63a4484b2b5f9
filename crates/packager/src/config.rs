//! Packager tunables.
//!
//! The defaults are the production behaviour: three packages, a ceiling of
//! 1.2x the stated budget, cyclic fallback substitution.

use serde::{Deserialize, Serialize};

/// Number of packages a client is shown
pub const DEFAULT_PACKAGE_QUOTA: usize = 3;

/// Budget ceiling multiplier (20% tolerance above the stated budget)
pub const DEFAULT_CEILING_FACTOR: f64 = 1.2;

/// How fallback packages pick the substitute offering for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackStrategy {
    /// Slot `i` takes `alternatives[(i + 1) % len]` from the target category.
    /// May pick the very offering already in the base package.
    #[default]
    Cyclic,
    /// Slot takes the cheapest offering of the target category that is not
    /// in the base package and was not already used for that category.
    NextCheapest,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackagerConfig {
    pub package_quota: usize,
    pub ceiling_factor: f64,
    pub fallback_strategy: FallbackStrategy,
}

impl PackagerConfig {
    pub fn new() -> Self {
        Self {
            package_quota: DEFAULT_PACKAGE_QUOTA,
            ceiling_factor: DEFAULT_CEILING_FACTOR,
            fallback_strategy: FallbackStrategy::Cyclic,
        }
    }

    /// Configure the number of packages (default: 3, minimum: 1)
    pub fn with_package_quota(mut self, quota: usize) -> Self {
        self.package_quota = quota.max(1);
        self
    }

    /// Configure the budget ceiling multiplier (default: 1.2)
    pub fn with_ceiling_factor(mut self, factor: f64) -> Self {
        self.ceiling_factor = factor;
        self
    }

    pub fn with_fallback_strategy(mut self, strategy: FallbackStrategy) -> Self {
        self.fallback_strategy = strategy;
        self
    }

    /// Maximum total price allowed for `budget`
    pub fn budget_ceiling(&self, budget: f64) -> f64 {
        budget * self.ceiling_factor
    }
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PackagerConfig::default();
        assert_eq!(config.package_quota, 3);
        assert_eq!(config.fallback_strategy, FallbackStrategy::Cyclic);
        assert_eq!(config.budget_ceiling(100.0), 100.0 * 1.2);
    }

    #[test]
    fn test_quota_never_zero() {
        let config = PackagerConfig::new().with_package_quota(0);
        assert_eq!(config.package_quota, 1);
    }
}
