//! Candidate selection from the component catalog.

use bagcraft_common::ComponentId;
use serde::{Deserialize, Serialize};

use crate::catalog::ComponentCatalog;

/// Selects which catalog components become search candidates.
///
/// An empty `include` list means every component. `exclude` always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentFilter {
    /// Only these ids, when non-empty
    pub include: Vec<ComponentId>,
    /// Never these ids
    pub exclude: Vec<ComponentId>,
    /// Lowest accepted weight
    pub min_weight: Option<u32>,
    /// Highest accepted weight
    pub max_weight: Option<u32>,
}

impl ComponentFilter {
    /// A filter that accepts every component.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to the given ids.
    #[must_use]
    pub fn including(mut self, ids: impl IntoIterator<Item = ComponentId>) -> Self {
        self.include.extend(ids);
        self
    }

    /// Drops the given ids.
    #[must_use]
    pub fn excluding(mut self, ids: impl IntoIterator<Item = ComponentId>) -> Self {
        self.exclude.extend(ids);
        self
    }

    /// Keeps weights in `min..=max`.
    #[must_use]
    pub fn weight_between(mut self, min: u32, max: u32) -> Self {
        self.min_weight = Some(min);
        self.max_weight = Some(max);
        self
    }

    /// Whether one component passes.
    #[must_use]
    pub fn accepts(&self, id: ComponentId, weight: u32) -> bool {
        if !self.include.is_empty() && !self.include.contains(&id) {
            return false;
        }
        if self.exclude.contains(&id) {
            return false;
        }
        self.min_weight.map_or(true, |min| weight >= min)
            && self.max_weight.map_or(true, |max| weight <= max)
    }

    /// Accepted component ids in catalog order.
    #[must_use]
    pub fn apply(&self, components: &ComponentCatalog) -> Vec<ComponentId> {
        components
            .iter()
            .filter(|component| self.accepts(component.id, component.weight))
            .map(|component| component.id)
            .collect()
    }
}
