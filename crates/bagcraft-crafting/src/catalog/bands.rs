//! Threshold tables keyed by total recipe weight.
//!
//! Two tables share the same shape: an ascending list of inclusive ceilings
//! closed by one unbounded entry.
//! - [`QualityBands`] maps total weight to the displayed quality range.
//! - [`CraftingTiers`] maps total weight to the item pool the draw uses.

use bagcraft_common::{CatalogError, CatalogResult, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Checks that ceilings strictly ascend and only the last one is `None`.
fn check_ceilings(
    table: &'static str,
    ceilings: impl ExactSizeIterator<Item = Option<u32>>,
) -> CatalogResult<()> {
    let count = ceilings.len();
    if count == 0 {
        return Err(CatalogError::EmptyTable { table });
    }

    let mut previous: Option<u32> = None;
    for (i, ceiling) in ceilings.enumerate() {
        let is_last = i + 1 == count;
        match ceiling {
            None if is_last => {},
            None => return Err(CatalogError::UnboundedPlacement { table }),
            Some(_) if is_last => return Err(CatalogError::UnboundedPlacement { table }),
            Some(next) => {
                if let Some(previous) = previous {
                    if next <= previous {
                        return Err(CatalogError::CeilingOrder {
                            table,
                            previous,
                            next,
                        });
                    }
                }
                previous = Some(next);
            },
        }
    }
    Ok(())
}

/// Inclusive item quality range shown for a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualityRange {
    /// Lowest quality
    pub min: u8,
    /// Highest quality
    pub max: u8,
}

impl QualityRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }
}

/// One row of the quality band table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityBand {
    /// Lowest quality
    pub min: u8,
    /// Highest quality
    pub max: u8,
    /// Largest total weight in this band; `None` is unbounded
    #[serde(default)]
    pub ceiling: Option<u32>,
}

impl QualityBand {
    /// Creates a bounded band.
    #[must_use]
    pub const fn bounded(min: u8, max: u8, ceiling: u32) -> Self {
        Self {
            min,
            max,
            ceiling: Some(ceiling),
        }
    }

    /// Creates the closing unbounded band.
    #[must_use]
    pub const fn unbounded(min: u8, max: u8) -> Self {
        Self {
            min,
            max,
            ceiling: None,
        }
    }

    /// The quality range of this band.
    #[must_use]
    pub const fn range(&self) -> QualityRange {
        QualityRange::new(self.min, self.max)
    }
}

/// Ordered quality band table.
#[derive(Debug, Clone)]
pub struct QualityBands {
    bounded: Vec<(u32, QualityRange)>,
    unbounded: QualityRange,
}

impl QualityBands {
    /// Builds the table from ascending bands ending in one unbounded band.
    pub fn new(bands: &[QualityBand]) -> CatalogResult<Self> {
        check_ceilings("quality band", bands.iter().map(|band| band.ceiling))?;
        if let Some(band) = bands.iter().find(|band| band.min > band.max) {
            return Err(CatalogError::InvertedBand {
                min: band.min,
                max: band.max,
            });
        }

        let mut bounded = Vec::with_capacity(bands.len() - 1);
        let mut unbounded = QualityRange::new(0, 0);
        for band in bands {
            match band.ceiling {
                Some(ceiling) => bounded.push((ceiling, band.range())),
                None => unbounded = band.range(),
            }
        }
        Ok(Self { bounded, unbounded })
    }

    /// Range of the first band whose ceiling is `>= total`.
    #[must_use]
    pub fn range_for(&self, total: u32) -> QualityRange {
        self.bounded
            .iter()
            .find(|(ceiling, _)| total <= *ceiling)
            .map_or(self.unbounded, |(_, range)| *range)
    }

    /// The bands in table order.
    #[must_use]
    pub fn bands(&self) -> Vec<QualityBand> {
        self.bounded
            .iter()
            .map(|(ceiling, range)| QualityBand::bounded(range.min, range.max, *ceiling))
            .chain(std::iter::once(QualityBand::unbounded(
                self.unbounded.min,
                self.unbounded.max,
            )))
            .collect()
    }
}

/// Items a tier adds on top of the tier below it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierSpec {
    /// Largest total weight served by this tier; `None` is unbounded
    #[serde(default)]
    pub ceiling: Option<u32>,
    /// Items added by this tier
    #[serde(default)]
    pub additions: Vec<ItemId>,
}

impl TierSpec {
    /// Creates a tier spec.
    #[must_use]
    pub fn new(ceiling: Option<u32>, additions: impl IntoIterator<Item = u32>) -> Self {
        Self {
            ceiling,
            additions: additions.into_iter().map(ItemId::new).collect(),
        }
    }
}

/// A crafting tier with its full, cumulative pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftingTier {
    /// Largest total weight served; `None` is unbounded
    pub ceiling: Option<u32>,
    /// Pool in ascending item id order
    pub pool: Vec<ItemId>,
}

/// Ladder of crafting tiers; each tier's pool strictly contains the previous.
#[derive(Debug, Clone)]
pub struct CraftingTiers {
    tiers: Vec<CraftingTier>,
}

impl CraftingTiers {
    /// Builds cumulative pools from per-tier additions.
    ///
    /// The first tier may be empty. Every later tier must add at least one
    /// item not already present below it.
    pub fn new(specs: &[TierSpec]) -> CatalogResult<Self> {
        check_ceilings("crafting tier", specs.iter().map(|spec| spec.ceiling))?;

        let mut pool = BTreeSet::new();
        let mut tiers = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            let before = pool.len();
            pool.extend(spec.additions.iter().copied());
            if i > 0 && pool.len() == before {
                return Err(CatalogError::NotSuperset { tier: i });
            }
            tiers.push(CraftingTier {
                ceiling: spec.ceiling,
                pool: pool.iter().copied().collect(),
            });
        }
        Ok(Self { tiers })
    }

    /// Tier serving `total`: the first whose ceiling is `>= total`, else the
    /// unbounded last tier.
    #[must_use]
    pub fn tier_for(&self, total: u32) -> Option<&CraftingTier> {
        self.tiers
            .iter()
            .find(|tier| tier.ceiling.map_or(true, |ceiling| total <= ceiling))
    }

    /// Pool served for `total`; empty if that tier has no items.
    #[must_use]
    pub fn pool_for(&self, total: u32) -> &[ItemId] {
        self.tier_for(total)
            .map(|tier| tier.pool.as_slice())
            .unwrap_or_default()
    }

    /// Iterates tiers from lowest to highest.
    pub fn iter(&self) -> impl Iterator<Item = &CraftingTier> {
        self.tiers.iter()
    }

    /// Number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Returns true if there are no tiers. Never true for a built ladder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
