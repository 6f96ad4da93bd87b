//! Bounded walkers over eight-slot combinations of a candidate list.
//!
//! Both walkers are explicit index odometers. They yield [`Recipe`]s lazily
//! and stop after `cap` leaves, so callers can also break out early.

use bagcraft_common::ComponentId;

use crate::recipe::{Recipe, RECIPE_SLOTS};

/// Leaf budget of a positional walk: `min(hard_cap, n^8)`, saturating.
#[must_use]
pub fn positional_leaf_cap(candidates: usize, hard_cap: usize) -> usize {
    let leaves = u64::try_from(candidates)
        .unwrap_or(u64::MAX)
        .saturating_pow(RECIPE_SLOTS as u32);
    usize::try_from(leaves).unwrap_or(usize::MAX).min(hard_cap)
}

/// Number of multisets of size eight over `candidates` items, `C(n+7, 8)`.
///
/// Saturates at `u64::MAX`.
#[must_use]
pub fn multiset_count(candidates: usize) -> u64 {
    if candidates == 0 {
        return 0;
    }
    let n = candidates as u128;
    let mut count: u128 = 1;
    for k in 1..=RECIPE_SLOTS as u128 {
        // Exact: a product of k consecutive integers is divisible by k!
        count = match count.checked_mul(n + k - 1) {
            Some(product) => product / k,
            None => return u64::MAX,
        };
    }
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// Every ordered eight-slot arrangement, slot 0 outermost and slot 7 fastest.
#[derive(Debug, Clone)]
pub struct PositionalWalker<'a> {
    candidates: &'a [ComponentId],
    indices: [usize; RECIPE_SLOTS],
    cap: usize,
    yielded: usize,
    exhausted: bool,
}

impl<'a> PositionalWalker<'a> {
    /// Walks at most `cap` leaves of `candidates`.
    #[must_use]
    pub fn new(candidates: &'a [ComponentId], cap: usize) -> Self {
        Self {
            candidates,
            indices: [0; RECIPE_SLOTS],
            cap,
            yielded: 0,
            exhausted: candidates.is_empty(),
        }
    }

    /// Leaves yielded so far.
    #[must_use]
    pub const fn yielded(&self) -> usize {
        self.yielded
    }

    fn current(&self) -> Recipe {
        Recipe::new(self.indices.map(|index| self.candidates[index]))
    }

    fn step(&mut self) {
        let len = self.candidates.len();
        for slot in (0..RECIPE_SLOTS).rev() {
            self.indices[slot] += 1;
            if self.indices[slot] < len {
                return;
            }
            self.indices[slot] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for PositionalWalker<'_> {
    type Item = Recipe;

    fn next(&mut self) -> Option<Recipe> {
        if self.exhausted || self.yielded >= self.cap {
            return None;
        }
        let recipe = self.current();
        self.yielded += 1;
        self.step();
        Some(recipe)
    }
}

/// Each multiset of eight candidates once, as non-decreasing index vectors.
#[derive(Debug, Clone)]
pub struct MultisetWalker<'a> {
    candidates: &'a [ComponentId],
    indices: [usize; RECIPE_SLOTS],
    cap: usize,
    yielded: usize,
    exhausted: bool,
}

impl<'a> MultisetWalker<'a> {
    /// Walks at most `cap` leaves of `candidates`.
    #[must_use]
    pub fn new(candidates: &'a [ComponentId], cap: usize) -> Self {
        Self {
            candidates,
            indices: [0; RECIPE_SLOTS],
            cap,
            yielded: 0,
            exhausted: candidates.is_empty(),
        }
    }

    /// Leaves yielded so far.
    #[must_use]
    pub const fn yielded(&self) -> usize {
        self.yielded
    }

    /// True when the walk stopped on its cap with leaves left over.
    #[must_use]
    pub const fn truncated(&self) -> bool {
        !self.exhausted && self.yielded >= self.cap
    }

    fn step(&mut self) {
        let last = self.candidates.len() - 1;
        let Some(slot) = (0..RECIPE_SLOTS).rev().find(|&slot| self.indices[slot] < last) else {
            self.exhausted = true;
            return;
        };
        let next = self.indices[slot] + 1;
        for index in &mut self.indices[slot..] {
            *index = next;
        }
    }
}

impl Iterator for MultisetWalker<'_> {
    type Item = Recipe;

    fn next(&mut self) -> Option<Recipe> {
        if self.exhausted || self.yielded >= self.cap {
            return None;
        }
        let recipe = Recipe::new(self.indices.map(|index| self.candidates[index]));
        self.yielded += 1;
        self.step();
        Some(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(raw: &[u32]) -> Vec<ComponentId> {
        raw.iter().copied().map(ComponentId::new).collect()
    }

    #[test]
    fn test_positional_leaf_cap() {
        assert_eq!(positional_leaf_cap(0, 10_000), 0);
        assert_eq!(positional_leaf_cap(1, 10_000), 1);
        assert_eq!(positional_leaf_cap(2, 10_000), 256);
        assert_eq!(positional_leaf_cap(3, 10_000), 6561);
        assert_eq!(positional_leaf_cap(4, 10_000), 10_000);
        assert_eq!(positional_leaf_cap(usize::MAX, 10_000), 10_000);
    }

    #[test]
    fn test_multiset_count() {
        assert_eq!(multiset_count(0), 0);
        assert_eq!(multiset_count(1), 1);
        assert_eq!(multiset_count(2), 9);
        assert_eq!(multiset_count(5), 495);
        assert_eq!(multiset_count(30), 38_608_020);
    }

    #[test]
    fn test_positional_order() {
        let candidates = ids(&[3, 7]);
        let leaves: Vec<Recipe> = PositionalWalker::new(&candidates, usize::MAX).collect();
        assert_eq!(leaves.len(), 256);
        assert_eq!(leaves[0].raw(), [3, 3, 3, 3, 3, 3, 3, 3]);
        assert_eq!(leaves[1].raw(), [3, 3, 3, 3, 3, 3, 3, 7]);
        assert_eq!(leaves[2].raw(), [3, 3, 3, 3, 3, 3, 7, 3]);
        assert_eq!(leaves[128].raw(), [7, 3, 3, 3, 3, 3, 3, 3]);
        assert_eq!(leaves[255].raw(), [7; 8]);
    }

    #[test]
    fn test_positional_respects_cap() {
        let candidates = ids(&(0..25).collect::<Vec<_>>());
        let mut walker = PositionalWalker::new(&candidates, 10_000);
        assert_eq!(walker.by_ref().count(), 10_000);
        assert_eq!(walker.yielded(), 10_000);
        assert!(walker.next().is_none());
    }

    #[test]
    fn test_empty_candidates_yield_nothing() {
        assert_eq!(PositionalWalker::new(&[], 10).count(), 0);
        assert_eq!(MultisetWalker::new(&[], 10).count(), 0);
    }

    #[test]
    fn test_multiset_walk_is_exhaustive_and_unique() {
        let candidates = ids(&[0, 1, 2, 3, 4]);
        let mut walker = MultisetWalker::new(&candidates, usize::MAX);
        let keys: HashSet<_> = walker.by_ref().map(|recipe| recipe.canonical_key()).collect();
        assert_eq!(keys.len(), 495);
        assert_eq!(walker.yielded(), 495);
        assert!(!walker.truncated());
    }

    #[test]
    fn test_multiset_leaves_are_sorted() {
        let candidates = ids(&[0, 1, 2]);
        for recipe in MultisetWalker::new(&candidates, usize::MAX) {
            assert!(recipe.slots().windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[test]
    fn test_multiset_truncation() {
        let candidates = ids(&[0, 1, 2, 3, 4]);
        let mut walker = MultisetWalker::new(&candidates, 100);
        assert_eq!(walker.by_ref().count(), 100);
        assert!(walker.truncated());

        let mut exact = MultisetWalker::new(&candidates, 495);
        assert_eq!(exact.by_ref().count(), 495);
        assert!(!exact.truncated());
    }
}
