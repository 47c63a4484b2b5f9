//! Combination generator.
//!
//! Enumerates the Cartesian product of the per-category candidate lists
//! lazily, one combination at a time, so the ranker can stream through it
//! without the full product ever existing in memory.
//!
//! Enumeration order is an odometer with the last category turning fastest,
//! the same order as nested loops over the categories. The ranker relies on
//! this order to break price ties.

use catalog::Offering;
use std::iter::FusedIterator;

/// One offering per requested category, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination<'a> {
    items: Vec<&'a Offering>,
}

impl<'a> Combination<'a> {
    pub fn new(items: Vec<&'a Offering>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[&'a Offering] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(|o| o.price).sum()
    }

    /// Mean item rating, missing ratings counted as 0
    pub fn score(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let total: f64 = self.items.iter().map(|o| o.rating_or_zero()).sum();
        total / self.items.len() as f64
    }

    /// Copy of this combination with the item at `position` swapped out
    pub fn with_substitute(&self, position: usize, substitute: &'a Offering) -> Self {
        let mut items = self.items.clone();
        items[position] = substitute;
        Self { items }
    }
}

/// Lazy, single-pass Cartesian product over candidate pools.
///
/// Yields nothing if there are no pools or any pool is empty.
#[derive(Debug, Clone)]
pub struct Combinations<'p, 'a> {
    pools: Vec<&'p [&'a Offering]>,
    indices: Vec<usize>,
    exhausted: bool,
    /// `None` when the product overflows `usize`
    remaining: Option<usize>,
}

impl<'p, 'a> Combinations<'p, 'a> {
    pub fn new(pools: Vec<&'p [&'a Offering]>) -> Self {
        let exhausted = pools.is_empty() || pools.iter().any(|p| p.is_empty());
        let remaining = if exhausted {
            Some(0)
        } else {
            pools
                .iter()
                .try_fold(1usize, |acc, pool| acc.checked_mul(pool.len()))
        };

        Self {
            indices: vec![0; pools.len()],
            pools,
            exhausted,
            remaining,
        }
    }

    /// Advance the odometer; marks exhaustion once the first wheel wraps
    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.pools[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.exhausted = true;
    }
}

impl<'p, 'a> Iterator for Combinations<'p, 'a> {
    type Item = Combination<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let items = self
            .pools
            .iter()
            .zip(&self.indices)
            .map(|(pool, &idx)| pool[idx])
            .collect();

        self.advance();
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        Some(Combination::new(items))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Combinations<'_, '_> {}
