//! Weight and quality model used to annotate search results.

use bagcraft_common::{ComponentId, ItemId};

use crate::catalog::{Catalog, QualityRange};
use crate::recipe::Recipe;

/// Separator used by [`Catalog::format_recipe`].
pub const RECIPE_SEPARATOR: &str = ", ";

impl Catalog {
    /// Weight of one component; unknown ids weigh 0.
    #[must_use]
    pub fn weight(&self, id: ComponentId) -> u32 {
        self.components.weight(id)
    }

    /// Total weight of a recipe, saturating at `u32::MAX`.
    #[must_use]
    pub fn recipe_weight(&self, recipe: &Recipe) -> u32 {
        recipe
            .slots()
            .iter()
            .fold(0u32, |total, &id| total.saturating_add(self.weight(id)))
    }

    /// Quality range displayed for a total weight.
    #[must_use]
    pub fn quality_range(&self, total_weight: u32) -> QualityRange {
        self.quality_bands.range_for(total_weight)
    }

    /// Quality of an item, 0 when the item is unknown.
    #[must_use]
    pub fn item_quality(&self, item: ItemId) -> u8 {
        self.items.quality(item)
    }

    /// Human-readable recipe: display names joined with `", "`.
    #[must_use]
    pub fn format_recipe(&self, components: &[ComponentId]) -> String {
        components
            .iter()
            .map(|&id| self.components.display_name(id))
            .collect::<Vec<_>>()
            .join(RECIPE_SEPARATOR)
    }
}
