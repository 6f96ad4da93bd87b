//! # bagcraft Crafting
//!
//! Seeded bag-of-crafting function and the recipe search built on it.
//!
//! This crate provides:
//! - Catalog tables (components, quality bands, crafting tiers, items, pools)
//! - Seed normalization and the crafting generator
//! - The deterministic crafting function
//! - Positional and multiset enumeration of eight-slot recipes
//! - Bounded target search with deduplication and diagnostics
//! - Exhaustive sweeps grouped by crafted item

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod craft;
pub mod diagnostics;
pub mod enumerate;
pub mod filter;
pub mod quality;
pub mod recipe;
pub mod rng;
pub mod search;
pub mod seed;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::craft::*;
    pub use crate::diagnostics::*;
    pub use crate::enumerate::*;
    pub use crate::filter::*;
    pub use crate::quality::*;
    pub use crate::recipe::*;
    pub use crate::rng::*;
    pub use crate::search::*;
    pub use crate::seed::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use bagcraft_common::{ComponentId, ItemId};
    use std::sync::Arc;

    #[test]
    fn test_filtered_candidates_feed_search() {
        let catalog = Arc::new(Catalog::builtin().expect("builtin catalog"));
        let candidates = ComponentFilter::all()
            .including([0, 1, 5, 8, 20].map(ComponentId::new))
            .apply(&catalog.components);

        let engine = RecipeEngine::new(Arc::clone(&catalog));
        let request =
            SearchRequest::new(candidates, ItemId::new(609)).with_seed("2LP2D89M");
        let report = engine.find_recipes(&request).expect("search");
        assert_eq!(report.total_found(), DEFAULT_MAX_RECIPES);
    }

    #[test]
    fn test_validated_recipe_crafts() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let raw = [0, 1, 5, 8, 20, 0, 0, 0];
        assert!(catalog.validate_recipe(&raw).is_empty());

        let bag = BagOfCrafting::new(Arc::new(catalog));
        let recipe = Recipe::from_raw(&raw).expect("recipe");
        let seed = bag.normalize_seed(Some(&Seed::from("2LP2D89M")));
        assert_eq!(bag.craft_recipe(&recipe, seed), Ok(ItemId::new(609)));
    }
}
