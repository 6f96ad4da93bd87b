//! Bounded recipe search.
//!
//! [`RecipeEngine::find_recipes`] walks every ordered eight-slot arrangement
//! of the candidate list, skips arrangements whose multiset was already
//! tried, and keeps the ones that craft the target. Two caps bound the walk:
//! a leaf budget and the number of accepted recipes.
//!
//! [`RecipeEngine::sweep`] walks multisets instead and groups every leaf by
//! the item it produces.

use ahash::AHashSet;
use bagcraft_common::{ComponentId, ItemId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, QualityRange};
use crate::craft::{BagOfCrafting, CraftError, CraftResult};
use crate::diagnostics::{Diagnostics, REFERENCE_RECIPE};
use crate::enumerate::{multiset_count, positional_leaf_cap, MultisetWalker, PositionalWalker};
use crate::recipe::{Recipe, RECIPE_SLOTS};
use crate::seed::Seed;

/// Default number of recipes returned by a search.
pub const DEFAULT_MAX_RECIPES: usize = 20;
/// Hard leaf budget of a search.
pub const LEAF_CAP: usize = 10_000;
/// Leaf budget of the diagnostic histogram.
pub const DIAGNOSTIC_LEAF_CAP: usize = 1_000;
/// Default leaf budget of a sweep.
pub const SWEEP_LEAF_CAP: usize = 250_000;
/// Default recipes kept per item by a sweep.
pub const DEFAULT_MAX_PER_ITEM: usize = 3;

/// Work bounds shared by every call on an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLimits {
    /// Leaves walked by a search, at most [`LEAF_CAP`]
    pub leaf_cap: usize,
    /// Leaves walked by the diagnostic histogram, at most [`DIAGNOSTIC_LEAF_CAP`]
    pub diagnostic_leaf_cap: usize,
    /// Leaves walked by a sweep
    pub sweep_leaf_cap: usize,
    /// Literal recipe probed by diagnostics
    pub reference_recipe: Recipe,
    /// Run diagnostics on empty results
    pub run_diagnostics: bool,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            leaf_cap: LEAF_CAP,
            diagnostic_leaf_cap: DIAGNOSTIC_LEAF_CAP,
            sweep_leaf_cap: SWEEP_LEAF_CAP,
            reference_recipe: Recipe::new(REFERENCE_RECIPE.map(ComponentId::new)),
            run_diagnostics: true,
        }
    }
}

impl SearchLimits {
    /// Clamps the caps into their supported ranges.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.leaf_cap = self.leaf_cap.clamp(1, LEAF_CAP);
        self.diagnostic_leaf_cap = self.diagnostic_leaf_cap.clamp(1, DIAGNOSTIC_LEAF_CAP);
        self.sweep_leaf_cap = self.sweep_leaf_cap.max(1);
        self
    }
}

/// One search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Ordered candidate list; order fixes discovery order
    pub components: Vec<ComponentId>,
    /// Item to craft
    pub target: ItemId,
    /// Stop after this many recipes
    pub max_recipes: usize,
    /// Caller seed, normalized before use
    pub seed: Option<Seed>,
}

impl SearchRequest {
    /// Creates a request with the default recipe limit and no seed.
    #[must_use]
    pub fn new(components: Vec<ComponentId>, target: ItemId) -> Self {
        Self {
            components,
            target,
            max_recipes: DEFAULT_MAX_RECIPES,
            seed: None,
        }
    }

    /// Sets the recipe limit.
    #[must_use]
    pub fn with_max_recipes(mut self, max_recipes: usize) -> Self {
        self.max_recipes = max_recipes;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }
}

/// A recipe that crafts the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    /// Slots in discovery order
    pub components: Recipe,
    /// Total weight
    pub weight: u32,
    /// Displayed quality range for the weight
    pub quality_range: QualityRange,
    /// Quality of the crafted item
    pub item_quality: u8,
    /// Component names joined with ", "
    pub formatted: String,
}

/// Counters from one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Leaves reached, duplicates included
    pub leaves_checked: usize,
    /// Leaves skipped for a repeated canonical key
    pub duplicates_skipped: usize,
    /// Leaves whose crafting failed
    pub failed_leaves: usize,
    /// Leaf budget in force
    pub leaf_cap: usize,
}

/// Outcome of [`RecipeEngine::find_recipes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    /// Item searched for
    pub target: ItemId,
    /// Normalized seed
    pub seed: u32,
    /// Candidate list after padding
    pub candidates: Vec<ComponentId>,
    /// Matches in discovery order
    pub records: Vec<RecipeRecord>,
    /// Walk counters
    pub stats: SearchStats,
    /// Present when nothing matched and diagnostics are enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

impl SearchReport {
    /// Number of recipes found.
    #[must_use]
    pub fn total_found(&self) -> usize {
        self.records.len()
    }

    /// True when no recipe matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of [`RecipeEngine::sweep`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Normalized seed
    pub seed: u32,
    /// Distinct candidates walked
    pub candidates: Vec<ComponentId>,
    /// Recipes grouped by crafted item
    pub recipes: BTreeMap<ItemId, Vec<Recipe>>,
    /// Multisets of the candidates, walked or not
    pub combinations: u64,
    /// Leaves walked
    pub leaves: usize,
    /// Leaves whose crafting failed
    pub failed_leaves: usize,
    /// The leaf cap stopped the walk early
    pub truncated: bool,
}

/// Recipe search bound to a catalog.
///
/// Holds only shared read-only state; calls may run concurrently.
#[derive(Debug, Clone)]
pub struct RecipeEngine {
    bag: BagOfCrafting,
    limits: SearchLimits,
}

impl RecipeEngine {
    /// Creates an engine with default limits.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_limits(catalog, SearchLimits::default())
    }

    /// Creates an engine with custom limits (clamped).
    #[must_use]
    pub fn with_limits(catalog: Arc<Catalog>, limits: SearchLimits) -> Self {
        Self {
            bag: BagOfCrafting::new(catalog),
            limits: limits.clamped(),
        }
    }

    /// The catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.bag.catalog()
    }

    /// The crafting function in use.
    #[must_use]
    pub fn bag(&self) -> &BagOfCrafting {
        &self.bag
    }

    /// Limits in force.
    #[must_use]
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Pads a candidate list to eight entries by repeating its first entry.
    ///
    /// Longer lists are returned unchanged.
    pub fn padded_candidates(components: &[ComponentId]) -> CraftResult<Vec<ComponentId>> {
        let first = *components.first().ok_or(CraftError::NoComponents)?;
        let mut padded = components.to_vec();
        if padded.len() < RECIPE_SLOTS {
            padded.resize(RECIPE_SLOTS, first);
        }
        Ok(padded)
    }

    /// Finds recipes crafting `request.target`.
    ///
    /// Fails only on an empty candidate list. Leaves that fail to craft are
    /// skipped and counted.
    pub fn find_recipes(&self, request: &SearchRequest) -> CraftResult<SearchReport> {
        let candidates = Self::padded_candidates(&request.components)?;
        let seed = self.bag.normalize_seed(request.seed.as_ref());
        let leaf_cap = positional_leaf_cap(candidates.len(), self.limits.leaf_cap);

        info!(
            "Searching for item {} with components [{}]",
            request.target,
            join(&candidates)
        );
        if let Some(raw) = &request.seed {
            debug!("Using seed {} (normalized {})", raw, seed);
        }

        let mut stats = SearchStats {
            leaf_cap,
            ..SearchStats::default()
        };
        let mut records = Vec::new();
        let mut seen = AHashSet::new();

        if request.max_recipes > 0 {
            for recipe in PositionalWalker::new(&candidates, leaf_cap) {
                stats.leaves_checked += 1;
                if !seen.insert(recipe.canonical_key()) {
                    stats.duplicates_skipped += 1;
                    continue;
                }
                match self.bag.craft_recipe(&recipe, seed) {
                    Ok(item) if item == request.target => {
                        records.push(self.record(&recipe, item));
                        if records.len() >= request.max_recipes {
                            break;
                        }
                    },
                    Ok(_) => {},
                    Err(err) => {
                        stats.failed_leaves += 1;
                        debug!("Skipping leaf {}: {}", recipe, err);
                    },
                }
            }
        }

        info!(
            "Checked {} combinations, found {} recipes",
            stats.leaves_checked,
            records.len()
        );
        if stats.failed_leaves > 0 {
            warn!("{} leaves failed to craft", stats.failed_leaves);
        }

        let diagnostics = (records.is_empty() && self.limits.run_diagnostics).then(|| {
            let diagnostics = Diagnostics::collect(
                &self.bag,
                &candidates,
                request.target,
                seed,
                &self.limits.reference_recipe,
                self.limits.diagnostic_leaf_cap,
            );
            diagnostics.log(&self.bag, request.target, seed);
            diagnostics
        });

        Ok(SearchReport {
            target: request.target,
            seed,
            candidates,
            records,
            stats,
            diagnostics,
        })
    }

    /// Crafts every multiset of the candidates and groups recipes by item.
    ///
    /// Duplicate candidates are ignored. At most `max_per_item` recipes are
    /// kept for each item.
    pub fn sweep(
        &self,
        components: &[ComponentId],
        max_per_item: usize,
        seed: Option<&Seed>,
    ) -> CraftResult<SweepReport> {
        if components.is_empty() {
            return Err(CraftError::NoComponents);
        }
        let mut candidates = Vec::with_capacity(components.len());
        for &id in components {
            if !candidates.contains(&id) {
                candidates.push(id);
            }
        }
        let seed = self.bag.normalize_seed(seed);

        let combinations = multiset_count(candidates.len());
        info!(
            "Sweeping {} components: {} combinations (cap {} leaves)",
            candidates.len(),
            combinations,
            self.limits.sweep_leaf_cap
        );

        let mut recipes: BTreeMap<ItemId, Vec<Recipe>> = BTreeMap::new();
        let mut failed_leaves = 0;
        let mut walker = MultisetWalker::new(&candidates, self.limits.sweep_leaf_cap);
        for recipe in walker.by_ref() {
            match self.bag.craft_recipe(&recipe, seed) {
                Ok(item) => {
                    let bucket = recipes.entry(item).or_default();
                    if bucket.len() < max_per_item {
                        bucket.push(recipe);
                    }
                },
                Err(err) => {
                    failed_leaves += 1;
                    debug!("Skipping leaf {}: {}", recipe, err);
                },
            }
        }
        recipes.retain(|_, bucket| !bucket.is_empty());

        let truncated = walker.truncated();
        if truncated {
            warn!(
                "Sweep stopped at {} of {} combinations",
                walker.yielded(),
                combinations
            );
        }
        info!(
            "Sweep walked {} leaves, reached {} items",
            walker.yielded(),
            recipes.len()
        );

        Ok(SweepReport {
            seed,
            combinations,
            leaves: walker.yielded(),
            truncated,
            candidates,
            recipes,
            failed_leaves,
        })
    }

    fn record(&self, recipe: &Recipe, item: ItemId) -> RecipeRecord {
        let catalog = self.catalog();
        let weight = catalog.recipe_weight(recipe);
        RecipeRecord {
            components: *recipe,
            weight,
            quality_range: catalog.quality_range(weight),
            item_quality: catalog.item_quality(item),
            formatted: catalog.format_recipe(recipe.slots()),
        }
    }
}

fn join(ids: &[ComponentId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
