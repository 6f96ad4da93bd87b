//! Component catalog: names and weights of the craftable ingredients.

use bagcraft_common::{CatalogError, CatalogResult, ComponentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A crafting component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Component identifier
    pub id: ComponentId,
    /// Display name
    pub name: String,
    /// Weight added to a recipe's total quality
    pub weight: u32,
}

impl Component {
    /// Creates a component.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, weight: u32) -> Self {
        Self {
            id: ComponentId::new(id),
            name: name.into(),
            weight,
        }
    }
}

/// Ordered table of components with ids `0..K`.
#[derive(Debug, Clone)]
pub struct ComponentCatalog {
    components: Vec<Component>,
    by_name: HashMap<String, ComponentId>,
}

impl ComponentCatalog {
    /// Builds the catalog. Ids must be exactly `0..K` after sorting.
    pub fn new(mut components: Vec<Component>) -> CatalogResult<Self> {
        if components.is_empty() {
            return Err(CatalogError::EmptyComponents);
        }

        components.sort_by_key(|component| component.id);
        for (expected, component) in components.iter().enumerate() {
            if component.id.raw() != expected as u32 {
                return Err(CatalogError::NonContiguousComponent {
                    expected: expected as u32,
                    actual: component.id.raw(),
                });
            }
        }

        let by_name = components
            .iter()
            .map(|component| (component.name.to_lowercase(), component.id))
            .collect();

        Ok(Self {
            components,
            by_name,
        })
    }

    /// Number of components (`K`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the catalog is empty. Never true for a built catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Gets a component by ID.
    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.raw() as usize)
    }

    /// Checks whether `id` is in the catalog.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        (id.raw() as usize) < self.components.len()
    }

    /// Weight of a component. Unknown ids weigh 0.
    #[must_use]
    pub fn weight(&self, id: ComponentId) -> u32 {
        self.get(id).map_or(0, |component| component.weight)
    }

    /// Display name of a component, `Unknown (<id>)` when absent.
    #[must_use]
    pub fn display_name(&self, id: ComponentId) -> String {
        self.get(id)
            .map_or_else(|| format!("Unknown ({id})"), |component| component.name.clone())
    }

    /// Looks a component up by name (case-insensitive).
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<ComponentId> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    /// Iterates components in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComponentCatalog {
        ComponentCatalog::new(vec![
            Component::new(1, "Red Heart", 1),
            Component::new(0, "Empty", 0),
            Component::new(2, "Soul Heart", 4),
        ])
        .expect("valid catalog")
    }

    #[test]
    fn test_sorted_by_id() {
        let catalog = sample();
        let ids: Vec<u32> = catalog.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_unknown_component_weighs_zero() {
        let catalog = sample();
        assert_eq!(catalog.weight(ComponentId::new(2)), 4);
        assert_eq!(catalog.weight(ComponentId::new(77)), 0);
        assert!(!catalog.contains(ComponentId::new(3)));
    }

    #[test]
    fn test_display_name_fallback() {
        let catalog = sample();
        assert_eq!(catalog.display_name(ComponentId::new(1)), "Red Heart");
        assert_eq!(catalog.display_name(ComponentId::new(42)), "Unknown (42)");
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = sample();
        assert_eq!(catalog.id_by_name("soul heart"), Some(ComponentId::new(2)));
        assert_eq!(catalog.id_by_name(" RED HEART "), Some(ComponentId::new(1)));
        assert_eq!(catalog.id_by_name("Bomb"), None);
    }

    #[test]
    fn test_rejects_gaps() {
        let result = ComponentCatalog::new(vec![
            Component::new(0, "Empty", 0),
            Component::new(2, "Soul Heart", 4),
        ]);
        assert_eq!(
            result.err(),
            Some(CatalogError::NonContiguousComponent {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            ComponentCatalog::new(Vec::new()).err(),
            Some(CatalogError::EmptyComponents)
        );
    }
}
