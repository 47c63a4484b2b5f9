//! Package selector & fallback synthesizer.
//!
//! The ranked combinations become primary packages. When there are fewer of
//! them than the quota, the remaining slots are filled by swapping the
//! offering of a single category in the cheapest combination.
//!
//! Fallback packages are NOT re-checked against the budget ceiling. They are
//! marked with [`PackageOrigin::Fallback`] so callers can tell them apart.

use crate::combinations::Combination;
use crate::config::{FallbackStrategy, PackagerConfig};
use crate::eligibility::EligibleOfferings;
use crate::ranking::ScoredCombination;
use crate::request::PackageRequest;
use catalog::{Category, Offering};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageOrigin {
    /// One of the cheapest affordable combinations
    Primary,
    /// Derived from the cheapest combination by single-category substitution
    Fallback,
}

/// A recommended bundle, one offering per requested category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    /// Sum of item prices, rounded to 2 decimals
    pub total_price: f64,
    /// Mean item rating, rounded to 2 decimals
    pub score: f64,
    pub items: Vec<Offering>,
    pub origin: PackageOrigin,
}

impl Package {
    fn from_combination(slot: usize, combination: &Combination, origin: PackageOrigin) -> Self {
        Self {
            name: format!("Package {}", slot + 1),
            total_price: round2(combination.total_price()),
            score: round2(combination.score()),
            items: combination.items().iter().map(|&o| o.clone()).collect(),
            origin,
        }
    }

    /// True if the total price fits under `ceiling` at cent precision.
    ///
    /// Both sides are rounded, so every primary package passes; a raw total a
    /// fraction of a cent over the ceiling is indistinguishable here.
    pub fn within_ceiling(&self, ceiling: f64) -> bool {
        self.total_price <= round2(ceiling)
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == PackageOrigin::Fallback
    }
}

/// Round to 2 decimal places from the exact stored value, ties to even.
///
/// Float formatting works on the exact binary value, so 1.115 (stored just
/// below) becomes 1.11 and the exact tie 0.125 becomes 0.12.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Build the final package list: primaries first, then fallbacks in slot order.
///
/// `ranked` must be ascending by price and non-empty for fallbacks to be
/// produced; its first element is the base of every substitution.
pub fn select_packages(
    ranked: &[ScoredCombination],
    eligible: &EligibleOfferings,
    request: &PackageRequest,
    config: &PackagerConfig,
) -> Vec<Package> {
    let quota = config.package_quota;

    let mut packages: Vec<Package> = ranked
        .iter()
        .take(quota)
        .enumerate()
        .map(|(slot, scored)| {
            Package::from_combination(slot, &scored.combination, PackageOrigin::Primary)
        })
        .collect();

    let Some(base) = ranked.first() else {
        return packages;
    };

    let mut synthesizer = FallbackSynthesizer::new(&base.combination, eligible, request, config);
    for slot in packages.len()..quota {
        match synthesizer.substitute(slot) {
            Some(combination) => packages.push(Package::from_combination(
                slot,
                &combination,
                PackageOrigin::Fallback,
            )),
            None => debug!("No substitute available for slot {}", slot + 1),
        }
    }

    packages
}

/// Derives single-substitution variants of the base combination
struct FallbackSynthesizer<'s, 'a> {
    base: &'s Combination<'a>,
    eligible: &'s EligibleOfferings<'a>,
    categories: &'s [Category],
    strategy: FallbackStrategy,
    /// Substitutes already handed out per category (NextCheapest only)
    used: HashMap<&'s str, Vec<&'a Offering>>,
}

impl<'s, 'a> FallbackSynthesizer<'s, 'a> {
    fn new(
        base: &'s Combination<'a>,
        eligible: &'s EligibleOfferings<'a>,
        request: &'s PackageRequest,
        config: &PackagerConfig,
    ) -> Self {
        Self {
            base,
            eligible,
            categories: request.categories(),
            strategy: config.fallback_strategy,
            used: HashMap::new(),
        }
    }

    /// Variant for `slot`, or `None` when the target category has no alternative
    fn substitute(&mut self, slot: usize) -> Option<Combination<'a>> {
        let (base, eligible, categories) = (self.base, self.eligible, self.categories);
        let target: &'s str = categories[slot % categories.len()].as_str();
        let alternatives = eligible.candidates(target);
        let position = base
            .items()
            .iter()
            .position(|item| item.category == target)?;

        let substitute = match self.strategy {
            FallbackStrategy::Cyclic => {
                if alternatives.len() <= 1 {
                    return None;
                }
                alternatives[(slot + 1) % alternatives.len()]
            }
            FallbackStrategy::NextCheapest => {
                let current = base.items()[position];
                let used = self.used.entry(target).or_default();
                let pick = alternatives
                    .iter()
                    .copied()
                    .filter(|&o| !std::ptr::eq(o, current))
                    .filter(|&o| !used.iter().any(|&u| std::ptr::eq(u, o)))
                    .min_by(|a, b| a.price.total_cmp(&b.price))?;
                used.push(pick);
                pick
            }
        };

        debug!(
            "Slot {}: substituting {} in {} with {}",
            slot + 1,
            base.items()[position].display_name(),
            target,
            substitute.display_name()
        );
        Some(base.with_substitute(position, substitute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.5), 3.5);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(1234.5678), 1234.57);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round2_ties_and_stored_values() {
        // Exact ties go to the even digit
        assert_eq!(round2(4.625), 4.62);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        // Stored just below the written value
        assert_eq!(round2(1.115), 1.11);
    }

    #[test]
    fn test_score_rounds_tie_to_even() {
        let a = Offering::new("venue", 100.0).with_rating(4.5);
        let b = Offering::new("buffet", 100.0).with_rating(4.75);
        let package =
            Package::from_combination(0, &Combination::new(vec![&a, &b]), PackageOrigin::Primary);
        assert_eq!(package.score, 4.62);
    }

    #[test]
    fn test_package_naming_and_rounding() {
        let a = Offering::new("venue", 100.004).with_rating(4.0);
        let b = Offering::new("buffet", 200.0).with_rating(3.0);
        let c = Offering::new("dj", 0.0);
        let combination = Combination::new(vec![&a, &b, &c]);

        let package = Package::from_combination(1, &combination, PackageOrigin::Primary);
        assert_eq!(package.name, "Package 2");
        assert_eq!(package.total_price, 300.0);
        assert_eq!(package.score, 2.33);
        assert_eq!(package.items.len(), 3);
        assert!(!package.is_fallback());
    }

    #[test]
    fn test_within_ceiling() {
        let a = Offering::new("venue", 700.0);
        let package =
            Package::from_combination(0, &Combination::new(vec![&a]), PackageOrigin::Fallback);
        assert!(package.within_ceiling(700.0));
        assert!(!package.within_ceiling(699.99));
        assert!(package.is_fallback());
    }

    #[test]
    fn test_within_ceiling_at_cent_precision() {
        // Raw total 100.006 fits a 100.006 ceiling but rounds up to 100.01
        let a = Offering::new("venue", 100.006);
        let package =
            Package::from_combination(0, &Combination::new(vec![&a]), PackageOrigin::Primary);
        assert_eq!(package.total_price, 100.01);
        assert!(package.within_ceiling(100.006));
        assert!(!package.within_ceiling(100.004));
    }
}
