//! Eight-slot recipes and their canonical keys.

use bagcraft_common::ComponentId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::craft::{CraftError, CraftResult};

/// Number of slots in a recipe.
pub const RECIPE_SLOTS: usize = 8;

/// An ordered sequence of exactly eight component ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe([ComponentId; RECIPE_SLOTS]);

impl Recipe {
    /// The all-empty recipe.
    pub const EMPTY: Self = Self([ComponentId::EMPTY; RECIPE_SLOTS]);

    /// Creates a recipe from eight slots.
    #[must_use]
    pub const fn new(slots: [ComponentId; RECIPE_SLOTS]) -> Self {
        Self(slots)
    }

    /// Creates a recipe from a slice, failing unless it has eight entries.
    pub fn from_slice(slots: &[ComponentId]) -> CraftResult<Self> {
        let slots: [ComponentId; RECIPE_SLOTS] =
            slots.try_into().map_err(|_| CraftError::WrongLength {
                expected: RECIPE_SLOTS,
                actual: slots.len(),
            })?;
        Ok(Self(slots))
    }

    /// Creates a recipe from raw ids.
    pub fn from_raw(ids: &[u32]) -> CraftResult<Self> {
        let slots: Vec<ComponentId> = ids.iter().copied().map(ComponentId::new).collect();
        Self::from_slice(&slots)
    }

    /// The slots in order.
    #[must_use]
    pub const fn slots(&self) -> &[ComponentId; RECIPE_SLOTS] {
        &self.0
    }

    /// The slots as raw ids.
    #[must_use]
    pub fn raw(&self) -> [u32; RECIPE_SLOTS] {
        self.0.map(ComponentId::raw)
    }

    /// Multiset key: the slots sorted ascending.
    #[must_use]
    pub fn canonical_key(&self) -> CanonicalKey {
        let mut sorted = self.0;
        sorted.sort_unstable();
        CanonicalKey(sorted)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", join_ids(&self.0))
    }
}

/// Recipes with equal keys contain the same components in some order.
///
/// Displays as the sorted ids joined with commas, e.g. `0,0,0,0,1,5,8,20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey([ComponentId; RECIPE_SLOTS]);

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_ids(&self.0))
    }
}

fn join_ids(ids: &[ComponentId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
