//! The bag of crafting function.
//!
//! `craft(components, seed)` is pure and deterministic:
//! 1. sum the component weights into a total quality,
//! 2. pick the crafting tier serving that total,
//! 3. seed a [`CraftRng`] and advance it once per slot,
//! 4. draw one index into the tier's pool.

use bagcraft_common::{ComponentId, ItemId};
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::recipe::{Recipe, RECIPE_SLOTS};
use crate::rng::CraftRng;
use crate::seed::{normalize_seed, Seed};

/// Crafting error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraftError {
    /// Recipe does not have exactly eight slots
    #[error("Invalid input: recipe must have exactly {expected} components, got {actual}")]
    WrongLength {
        /// Required slot count
        expected: usize,
        /// Supplied slot count
        actual: usize,
    },
    /// Search started with no candidate components
    #[error("Invalid input: at least one component required")]
    NoComponents,
    /// The tier serving this total has nothing to draw from
    #[error("Crafting tier for total quality {total} has an empty pool")]
    EmptyPool {
        /// Total recipe weight
        total: u32,
    },
}

impl CraftError {
    /// True for errors caused by caller input rather than catalog data.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::WrongLength { .. } | Self::NoComponents)
    }
}

/// Result type for crafting operations.
pub type CraftResult<T> = Result<T, CraftError>;

/// Crafting function bound to a catalog.
#[derive(Debug, Clone)]
pub struct BagOfCrafting {
    catalog: Arc<Catalog>,
}

impl BagOfCrafting {
    /// Creates a crafter over a shared catalog.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// The catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Normalizes a caller seed with the catalog's seed alphabet.
    #[must_use]
    pub fn normalize_seed(&self, seed: Option<&Seed>) -> u32 {
        normalize_seed(seed, self.catalog.seed_alphabet.as_ref())
    }

    /// Crafts from a slice of exactly eight components.
    pub fn craft(&self, components: &[ComponentId], seed: u32) -> CraftResult<ItemId> {
        let recipe = Recipe::from_slice(components)?;
        self.craft_recipe(&recipe, seed)
    }

    /// Crafts with an un-normalized seed.
    pub fn craft_seeded(
        &self,
        components: &[ComponentId],
        seed: Option<&Seed>,
    ) -> CraftResult<ItemId> {
        self.craft(components, self.normalize_seed(seed))
    }

    /// Crafts a recipe.
    pub fn craft_recipe(&self, recipe: &Recipe, seed: u32) -> CraftResult<ItemId> {
        let total = self.total_quality(recipe);
        let pool = self.catalog.tiers.pool_for(total);

        let mut rng = CraftRng::new(seed);
        // Slot values do not feed the generator; only the slot count does.
        rng.advance(RECIPE_SLOTS);

        rng.next_index(pool.len())
            .map(|index| pool[index])
            .ok_or(CraftError::EmptyPool { total })
    }

    /// Sum of component weights; unknown components weigh 0.
    #[must_use]
    pub fn total_quality(&self, recipe: &Recipe) -> u32 {
        self.catalog.recipe_weight(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        Component, ComponentCatalog, CraftingTiers, ItemDatabase, QualityBands, TierSpec,
    };
    use proptest::prelude::*;

    fn builtin() -> BagOfCrafting {
        BagOfCrafting::new(Arc::new(Catalog::builtin().expect("builtin catalog")))
    }

    fn ids(raw: &[u32]) -> Vec<ComponentId> {
        raw.iter().copied().map(ComponentId::new).collect()
    }

    #[test]
    fn test_eternal_d6_fixture() {
        let bag = builtin();
        let seed = Seed::from("2LP2D89M");
        let item = bag
            .craft_seeded(&ids(&[0, 1, 5, 8, 20, 0, 0, 0]), Some(&seed))
            .expect("craft");
        assert_eq!(item, ItemId::new(609));
    }

    #[test]
    fn test_lowercase_seed_matches_fixture() {
        let bag = builtin();
        let seed = Seed::from("2lp2d89m");
        let item = bag
            .craft_seeded(&ids(&[0, 1, 5, 8, 20, 0, 0, 0]), Some(&seed))
            .expect("craft");
        assert_eq!(item, ItemId::new(609));
    }

    #[test]
    fn test_recorded_outputs() {
        let bag = builtin();
        let seed = bag.normalize_seed(Some(&Seed::from("2LP2D89M")));
        assert_eq!(bag.craft(&ids(&[0; 8]), seed), Ok(ItemId::new(58)));
        assert_eq!(bag.craft(&ids(&[28; 8]), seed), Ok(ItemId::new(646)));
        assert_eq!(bag.craft(&ids(&[0; 8]), 0), Ok(ItemId::new(18)));
        assert_eq!(bag.craft(&ids(&[0, 1, 5, 8, 20, 0, 0, 0]), 0), Ok(ItemId::new(28)));
        assert_eq!(bag.craft(&ids(&[1, 1, 1, 0, 0, 0, 0, 0]), 12_345), Ok(ItemId::new(64)));
    }

    #[test]
    fn test_absent_seed_is_seed_zero() {
        let bag = builtin();
        let recipe = ids(&[0, 1, 5, 8, 20, 0, 0, 0]);
        assert_eq!(bag.craft_seeded(&recipe, None), bag.craft(&recipe, 0));
    }

    #[test]
    fn test_wrong_length_is_invalid_input() {
        let bag = builtin();
        for len in [0, 1, 7, 9, 16] {
            let err = bag.craft(&vec![ComponentId::EMPTY; len], 0).expect_err("must fail");
            assert_eq!(
                err,
                CraftError::WrongLength {
                    expected: 8,
                    actual: len
                }
            );
            assert!(err.is_invalid_input());
        }
    }

    #[test]
    fn test_unknown_components_weigh_zero() {
        let bag = builtin();
        let unknown = Recipe::from_raw(&[500, 0, 0, 0, 0, 0, 0, 0]).expect("recipe");
        assert_eq!(bag.total_quality(&unknown), 0);
        assert_eq!(bag.craft_recipe(&unknown, 77), bag.craft_recipe(&Recipe::EMPTY, 77));
    }

    #[test]
    fn test_heavy_weights_pick_the_top_tier() {
        let mut components = Catalog::builtin_components();
        components.push(Component::new(30, "Lead Heart", u32::MAX));
        let catalog = Catalog {
            components: ComponentCatalog::new(components).expect("components"),
            ..Catalog::builtin().expect("builtin catalog")
        };
        let bag = BagOfCrafting::new(Arc::new(catalog));
        let seed = bag.normalize_seed(Some(&Seed::from("2LP2D89M")));

        let heavy = ids(&[30, 30, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bag.craft(&heavy, seed), Ok(ItemId::new(646)));
    }

    #[test]
    fn test_empty_tier_fails() {
        let catalog = Catalog::new(
            ComponentCatalog::new(Catalog::builtin_components()).expect("components"),
            QualityBands::new(&Catalog::builtin_quality_bands()).expect("bands"),
            CraftingTiers::new(&[TierSpec::new(Some(3), [0_u32; 0]), TierSpec::new(None, [7])])
                .expect("tiers"),
            ItemDatabase::new(),
        );
        let bag = BagOfCrafting::new(Arc::new(catalog));

        let err = bag.craft_recipe(&Recipe::EMPTY, 1).expect_err("empty tier");
        assert_eq!(err, CraftError::EmptyPool { total: 0 });
        assert!(!err.is_invalid_input());

        let heavy = Recipe::from_raw(&[2, 0, 0, 0, 0, 0, 0, 0]).expect("recipe");
        assert_eq!(bag.craft_recipe(&heavy, 1), Ok(ItemId::new(7)));
    }

    #[test]
    fn test_fallback_seed_without_alphabet() {
        let catalog = Catalog::builtin().expect("builtin catalog").with_seed_alphabet(None);
        let bag = BagOfCrafting::new(Arc::new(catalog));
        let seed = Seed::from("2LP2D89M");
        assert_eq!(bag.normalize_seed(Some(&seed)), 1_984_403_868);
        // Still deterministic through the fallback path
        let recipe = ids(&[0, 1, 5, 8, 20, 0, 0, 0]);
        assert_eq!(
            bag.craft_seeded(&recipe, Some(&seed)),
            bag.craft_seeded(&recipe, Some(&seed))
        );
    }

    proptest! {
        #[test]
        fn prop_craft_is_deterministic(raw in prop::array::uniform8(0u32..32), seed in any::<u32>()) {
            let bag = builtin();
            let recipe = Recipe::from_raw(&raw).expect("recipe");
            prop_assert_eq!(bag.craft_recipe(&recipe, seed), bag.craft_recipe(&recipe, seed));
        }

        #[test]
        fn prop_output_is_in_served_pool(raw in prop::array::uniform8(0u32..30), seed in any::<u32>()) {
            let bag = builtin();
            let recipe = Recipe::from_raw(&raw).expect("recipe");
            let item = bag.craft_recipe(&recipe, seed).expect("builtin tiers are non-empty");
            let pool = bag.catalog().tiers.pool_for(bag.total_quality(&recipe));
            prop_assert!(pool.contains(&item));
        }
    }
}
