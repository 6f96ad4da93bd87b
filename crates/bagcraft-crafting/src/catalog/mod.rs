//! Static catalog tables consumed by the crafting function and the search.
//!
//! A [`Catalog`] is built once (from the built-in tables or a catalog file)
//! and then shared read-only, typically behind an `Arc`.

mod bands;
mod components;
mod defaults;
mod items;

pub use bands::{CraftingTier, CraftingTiers, QualityBand, QualityBands, QualityRange, TierSpec};
pub use components::{Component, ComponentCatalog};
pub use items::{ItemDatabase, ItemPool, ItemRecord, DEFAULT_SEARCH_LIMIT};

use bagcraft_common::{CatalogResult, ComponentId, SchemaVersion};
use std::fmt;

use crate::recipe::RECIPE_SLOTS;
use crate::seed::SeedAlphabet;

/// Every table the engine reads.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Version of the tables
    pub version: SchemaVersion,
    /// Component names and weights
    pub components: ComponentCatalog,
    /// Total weight to displayed quality range
    pub quality_bands: QualityBands,
    /// Total weight to crafting pool
    pub tiers: CraftingTiers,
    /// Item names, qualities and pools
    pub items: ItemDatabase,
    /// Seed alphabet; `None` selects the fallback seed hash
    pub seed_alphabet: Option<SeedAlphabet>,
}

impl Catalog {
    /// Assembles a catalog with the standard seed alphabet.
    #[must_use]
    pub fn new(
        components: ComponentCatalog,
        quality_bands: QualityBands,
        tiers: CraftingTiers,
        items: ItemDatabase,
    ) -> Self {
        Self {
            version: SchemaVersion::CATALOG,
            components,
            quality_bands,
            tiers,
            items,
            seed_alphabet: Some(SeedAlphabet::STANDARD),
        }
    }

    /// The built-in catalog.
    pub fn builtin() -> CatalogResult<Self> {
        let mut items = ItemDatabase::new();
        for item in defaults::items() {
            items.register(item)?;
        }
        for pool in defaults::pools() {
            items.add_pool(pool);
        }

        Ok(Self::new(
            ComponentCatalog::new(defaults::components())?,
            QualityBands::new(&defaults::quality_bands())?,
            CraftingTiers::new(&defaults::crafting_tiers())?,
            items,
        ))
    }

    /// Replaces the seed alphabet.
    #[must_use]
    pub fn with_seed_alphabet(mut self, alphabet: Option<SeedAlphabet>) -> Self {
        self.seed_alphabet = alphabet;
        self
    }

    /// Built-in component table.
    #[must_use]
    pub fn builtin_components() -> Vec<Component> {
        defaults::components()
    }

    /// Built-in quality bands.
    #[must_use]
    pub fn builtin_quality_bands() -> Vec<QualityBand> {
        defaults::quality_bands()
    }

    /// Built-in crafting tiers.
    #[must_use]
    pub fn builtin_tiers() -> Vec<TierSpec> {
        defaults::crafting_tiers()
    }

    /// Built-in item records.
    #[must_use]
    pub fn builtin_items() -> Vec<ItemRecord> {
        defaults::items()
    }

    /// Built-in item pools.
    #[must_use]
    pub fn builtin_pools() -> Vec<ItemPool> {
        defaults::pools()
    }

    /// Lists what is wrong with a raw recipe without rejecting it.
    ///
    /// Unknown components are reported here but still craft (as weight 0).
    #[must_use]
    pub fn validate_recipe(&self, raw: &[u32]) -> Vec<RecipeIssue> {
        let mut issues = Vec::new();
        if raw.len() != RECIPE_SLOTS {
            issues.push(RecipeIssue::WrongLength { actual: raw.len() });
        }
        for (slot, &id) in raw.iter().enumerate() {
            if !self.components.contains(ComponentId::new(id)) {
                issues.push(RecipeIssue::UnknownComponent { slot, id });
            }
        }
        issues
    }
}

/// A problem found by [`Catalog::validate_recipe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeIssue {
    /// Not exactly eight slots
    WrongLength {
        /// Slots supplied
        actual: usize,
    },
    /// Slot holds an id outside the catalog
    UnknownComponent {
        /// Zero-based slot
        slot: usize,
        /// Raw id
        id: u32,
    },
}

impl fmt::Display for RecipeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { actual } => {
                write!(f, "Recipe must have exactly {RECIPE_SLOTS} components, got {actual}")
            },
            Self::UnknownComponent { slot, id } => {
                write!(f, "Component {slot} has invalid ID {id}")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bagcraft_common::ItemId;

    #[test]
    fn test_builtin_catalog_builds() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert_eq!(catalog.components.len(), 30);
        assert_eq!(catalog.tiers.len(), 4);
        assert_eq!(catalog.items.pools().len(), 3);
        assert_eq!(catalog.seed_alphabet, Some(SeedAlphabet::STANDARD));
    }

    #[test]
    fn test_builtin_tier_sizes() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let sizes: Vec<usize> = catalog.tiers.iter().map(|tier| tier.pool.len()).collect();
        assert_eq!(sizes, vec![60, 97, 195, 293]);
    }

    #[test]
    fn test_builtin_tiers_are_nested() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let tiers: Vec<&CraftingTier> = catalog.tiers.iter().collect();
        for pair in tiers.windows(2) {
            assert!(pair[0].pool.iter().all(|item| pair[1].pool.contains(item)));
            assert!(pair[1].pool.len() > pair[0].pool.len());
        }
    }

    #[test]
    fn test_eternal_d6_only_in_upper_tiers() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let d6 = ItemId::new(609);
        assert!(!catalog.tiers.pool_for(7).contains(&d6));
        assert!(catalog.tiers.pool_for(8).contains(&d6));
        assert!(catalog.tiers.pool_for(40).contains(&d6));
    }

    #[test]
    fn test_validate_recipe() {
        let catalog = Catalog::builtin().expect("builtin catalog");
        assert!(catalog.validate_recipe(&[0, 1, 5, 8, 20, 0, 0, 0]).is_empty());

        let issues = catalog.validate_recipe(&[0, 1, 99]);
        assert_eq!(
            issues,
            vec![
                RecipeIssue::WrongLength { actual: 3 },
                RecipeIssue::UnknownComponent { slot: 2, id: 99 },
            ]
        );
        assert_eq!(issues[1].to_string(), "Component 2 has invalid ID 99");
    }
}
