//! Read-only probes run when a search finds nothing.
//!
//! They answer "why no recipe?": whether crafting works at all for the
//! seed, which items the candidate list actually reaches, and which pools
//! hold the target.

use bagcraft_common::{ComponentId, ItemId};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::craft::{BagOfCrafting, CraftResult};
use crate::enumerate::PositionalWalker;
use crate::recipe::Recipe;

/// Reference recipe probed by default: `[0,1,5,8,20,0,0,0]`.
pub const REFERENCE_RECIPE: [u32; 8] = [0, 1, 5, 8, 20, 0, 0, 0];

/// Result of crafting one probe recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ProbeOutcome {
    /// Crafting succeeded
    Crafted {
        /// Item produced
        item: ItemId,
    },
    /// Crafting failed
    Failed {
        /// Error message
        reason: String,
    },
}

impl From<CraftResult<ItemId>> for ProbeOutcome {
    fn from(result: CraftResult<ItemId>) -> Self {
        match result {
            Ok(item) => Self::Crafted { item },
            Err(err) => Self::Failed {
                reason: err.to_string(),
            },
        }
    }
}

/// Probe results attached to an empty search report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Outcome of the all-empty recipe
    pub empty_recipe: ProbeOutcome,
    /// The literal reference recipe probed
    pub reference_recipe: Recipe,
    /// Outcome of the reference recipe
    pub reference_outcome: ProbeOutcome,
    /// Item id to number of sampled leaves producing it
    pub histogram: BTreeMap<ItemId, u32>,
    /// Leaves walked for the histogram
    pub leaves_sampled: usize,
    /// Sampled leaves that failed to craft
    pub failed_leaves: usize,
    /// Names of the pools holding the target
    pub pools_containing_target: Vec<String>,
}

impl Diagnostics {
    /// Runs all probes.
    ///
    /// The histogram walks the same positional order as the search but
    /// without deduplication, stopping after `leaf_cap` leaves.
    #[must_use]
    pub fn collect(
        bag: &BagOfCrafting,
        candidates: &[ComponentId],
        target: ItemId,
        seed: u32,
        reference: &Recipe,
        leaf_cap: usize,
    ) -> Self {
        let empty_recipe = bag.craft_recipe(&Recipe::EMPTY, seed).into();
        let reference_outcome = bag.craft_recipe(reference, seed).into();

        let mut histogram = BTreeMap::new();
        let mut failed_leaves = 0;
        let mut walker = PositionalWalker::new(candidates, leaf_cap);
        for recipe in walker.by_ref() {
            match bag.craft_recipe(&recipe, seed) {
                Ok(item) => *histogram.entry(item).or_insert(0) += 1,
                Err(_) => failed_leaves += 1,
            }
        }

        Self {
            empty_recipe,
            reference_recipe: *reference,
            reference_outcome,
            histogram,
            leaves_sampled: walker.yielded(),
            failed_leaves,
            pools_containing_target: bag.catalog().items.pools_containing(target),
        }
    }

    /// Writes the probe results to the log.
    pub fn log(&self, bag: &BagOfCrafting, target: ItemId, seed: u32) {
        let items = &bag.catalog().items;
        info!(
            "Diagnostics for item {} ({}) with seed {}",
            target,
            items.display_name(target),
            seed
        );
        info!("  {} -> {}", Recipe::EMPTY, describe(&self.empty_recipe));
        info!(
            "  {} -> {}",
            self.reference_recipe,
            describe(&self.reference_outcome)
        );
        info!(
            "  {} sampled leaves reach {} distinct items ({} failed)",
            self.leaves_sampled,
            self.histogram.len(),
            self.failed_leaves
        );
        for (item, count) in &self.histogram {
            info!("    {} ({}): {}", item, items.display_name(*item), count);
        }
        if self.pools_containing_target.is_empty() {
            info!("  Target is in no known pool");
        } else {
            info!("  Target pools: {}", self.pools_containing_target.join(", "));
        }
    }
}

fn describe(outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Crafted { item } => format!("item {item}"),
        ProbeOutcome::Failed { reason } => format!("error: {reason}"),
    }
}
