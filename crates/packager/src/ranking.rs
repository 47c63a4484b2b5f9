//! Scorer & ranker.
//!
//! Streams combinations once, drops those above the budget ceiling and keeps
//! only the `keep` cheapest in a bounded max-heap. Ties on price go to the
//! combination enumerated first, which makes the result identical to a
//! stable ascending sort of every affordable combination.

use crate::combinations::Combination;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A combination with its price and score computed
#[derive(Debug, Clone)]
pub struct ScoredCombination<'a> {
    pub combination: Combination<'a>,
    pub total_price: f64,
    pub score: f64,
    /// Position in enumeration order; the tie-breaker
    pub sequence: usize,
}

impl<'a> ScoredCombination<'a> {
    pub fn new(combination: Combination<'a>, sequence: usize) -> Self {
        Self {
            total_price: combination.total_price(),
            score: combination.score(),
            combination,
            sequence,
        }
    }
}

impl PartialEq for ScoredCombination<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredCombination<'_> {}

impl PartialOrd for ScoredCombination<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredCombination<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_price
            .total_cmp(&other.total_price)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Result of one ranking pass
#[derive(Debug, Clone)]
pub struct RankingOutcome<'a> {
    /// Cheapest affordable combinations, ascending
    pub ranked: Vec<ScoredCombination<'a>>,
    /// Combinations enumerated
    pub generated: usize,
    /// Combinations within the ceiling (may exceed `ranked.len()`)
    pub affordable: usize,
}

/// Rank `combinations` by total price, keeping the `keep` cheapest under `ceiling`.
pub fn rank_combinations<'a, I>(combinations: I, ceiling: f64, keep: usize) -> RankingOutcome<'a>
where
    I: IntoIterator<Item = Combination<'a>>,
{
    let mut heap: BinaryHeap<ScoredCombination<'a>> = BinaryHeap::with_capacity(keep + 1);
    let mut generated = 0;
    let mut affordable = 0;

    for (sequence, combination) in combinations.into_iter().enumerate() {
        generated += 1;

        let scored = ScoredCombination::new(combination, sequence);
        if scored.total_price > ceiling {
            continue;
        }
        affordable += 1;

        if heap.len() < keep {
            heap.push(scored);
        } else if heap.peek().is_some_and(|worst| scored < *worst) {
            heap.pop();
            heap.push(scored);
        }
    }

    RankingOutcome {
        ranked: heap.into_sorted_vec(),
        generated,
        affordable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Offering;

    fn single(offerings: &[Offering]) -> Vec<Combination<'_>> {
        offerings.iter().map(|o| Combination::new(vec![o])).collect()
    }

    fn prices(outcome: &RankingOutcome) -> Vec<f64> {
        outcome.ranked.iter().map(|s| s.total_price).collect()
    }

    #[test]
    fn test_keeps_cheapest_ascending() {
        let offerings: Vec<_> = [500.0, 100.0, 300.0, 200.0, 400.0]
            .into_iter()
            .map(|p| Offering::new("venue", p))
            .collect();

        let outcome = rank_combinations(single(&offerings), 1000.0, 3);
        assert_eq!(prices(&outcome), vec![100.0, 200.0, 300.0]);
        assert_eq!(outcome.generated, 5);
        assert_eq!(outcome.affordable, 5);
    }

    #[test]
    fn test_discards_above_ceiling() {
        let offerings: Vec<_> = [50.0, 130.0, 120.0]
            .into_iter()
            .map(|p| Offering::new("venue", p))
            .collect();

        let outcome = rank_combinations(single(&offerings), 120.0, 3);
        assert_eq!(prices(&outcome), vec![50.0, 120.0]);
        assert_eq!(outcome.affordable, 2);
    }

    #[test]
    fn test_ties_go_to_enumeration_order() {
        let offerings = vec![
            Offering::new("venue", 100.0).with_id("first").with_rating(1.0),
            Offering::new("venue", 100.0).with_id("second").with_rating(5.0),
            Offering::new("venue", 100.0).with_id("third").with_rating(3.0),
        ];

        let outcome = rank_combinations(single(&offerings), 1000.0, 2);
        let ids: Vec<_> = outcome
            .ranked
            .iter()
            .map(|s| s.combination.items()[0].id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_nothing_affordable() {
        let offerings = vec![Offering::new("venue", 900.0)];
        let outcome = rank_combinations(single(&offerings), 100.0, 3);
        assert!(outcome.ranked.is_empty());
        assert_eq!(outcome.generated, 1);
        assert_eq!(outcome.affordable, 0);
    }
}
