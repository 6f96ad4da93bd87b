//! Item metadata and item pools.
//!
//! This module provides:
//! - Item names and qualities with case-insensitive name lookup
//! - Substring search over names and ids
//! - Named item pools (treasure, shop, boss, ...) for diagnostics

use bagcraft_common::{CatalogError, CatalogResult, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Default result limit for [`ItemDatabase::search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Metadata for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Item identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Item quality (0-4)
    #[serde(default)]
    pub quality: u8,
}

impl ItemRecord {
    /// Creates an item record.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, quality: u8) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            quality,
        }
    }
}

/// A named set of item ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPool {
    /// Pool name
    pub name: String,
    /// Member items
    pub members: BTreeSet<ItemId>,
}

impl ItemPool {
    /// Creates a pool.
    #[must_use]
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().map(ItemId::new).collect(),
        }
    }

    /// Checks pool membership.
    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.members.contains(&item)
    }
}

/// Item metadata and pools, read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ItemDatabase {
    by_id: HashMap<ItemId, ItemRecord>,
    by_name: HashMap<String, ItemId>,
    pools: Vec<ItemPool>,
}

impl ItemDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item.
    pub fn register(&mut self, item: ItemRecord) -> CatalogResult<()> {
        if self.by_id.contains_key(&item.id) {
            return Err(CatalogError::DuplicateItem(item.id.raw()));
        }
        self.by_name.insert(item.name.to_lowercase(), item.id);
        self.by_id.insert(item.id, item);
        Ok(())
    }

    /// Adds an item pool.
    pub fn add_pool(&mut self, pool: ItemPool) {
        self.pools.push(pool);
    }

    /// Number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if no items are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Gets an item by ID.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ItemRecord> {
        self.by_id.get(&id)
    }

    /// Display name, `Unknown Item <id>` when absent.
    #[must_use]
    pub fn display_name(&self, id: ItemId) -> String {
        self.get(id)
            .map_or_else(|| format!("Unknown Item {id}"), |item| item.name.clone())
    }

    /// Looks an item up by name (case-insensitive).
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<ItemId> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    /// Item quality, 0 when unknown.
    #[must_use]
    pub fn quality(&self, id: ItemId) -> u8 {
        self.get(id).map_or(0, |item| item.quality)
    }

    /// Items whose name or id contains `query` (case-insensitive), in id
    /// order, at most `limit` of them. An empty query lists everything.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&ItemRecord> {
        let query = query.trim().to_lowercase();
        let mut matches: Vec<&ItemRecord> = self
            .by_id
            .values()
            .filter(|item| {
                query.is_empty()
                    || item.name.to_lowercase().contains(&query)
                    || item.id.raw().to_string().contains(&query)
            })
            .collect();
        matches.sort_by_key(|item| item.id);
        matches.truncate(limit);
        matches
    }

    /// All pools in load order.
    #[must_use]
    pub fn pools(&self) -> &[ItemPool] {
        &self.pools
    }

    /// Names of the pools that list `item`.
    #[must_use]
    pub fn pools_containing(&self, item: ItemId) -> Vec<String> {
        self.pools
            .iter()
            .filter(|pool| pool.contains(item))
            .map(|pool| pool.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ItemDatabase {
        let mut db = ItemDatabase::new();
        db.register(ItemRecord::new(1, "Sad Onion", 2)).expect("register");
        db.register(ItemRecord::new(12, "Magic Mushroom", 4)).expect("register");
        db.register(ItemRecord::new(609, "Eternal D6", 4)).expect("register");
        db.add_pool(ItemPool::new("treasure", 1..=200));
        db.add_pool(ItemPool::new("boss", [12, 13, 14]));
        db
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let mut db = sample();
        let result = db.register(ItemRecord::new(1, "Other", 0));
        assert_eq!(result, Err(CatalogError::DuplicateItem(1)));
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        let db = sample();
        assert_eq!(db.id_by_name("eternal d6"), Some(ItemId::new(609)));
        assert_eq!(db.id_by_name("ETERNAL D6"), Some(ItemId::new(609)));
        assert_eq!(db.id_by_name("D7"), None);
    }

    #[test]
    fn test_quality_defaults_to_zero() {
        let db = sample();
        assert_eq!(db.quality(ItemId::new(609)), 4);
        assert_eq!(db.quality(ItemId::new(5)), 0);
    }

    #[test]
    fn test_display_name_fallback() {
        let db = sample();
        assert_eq!(db.display_name(ItemId::new(1)), "Sad Onion");
        assert_eq!(db.display_name(ItemId::new(77)), "Unknown Item 77");
    }

    #[test]
    fn test_search_by_name_and_id() {
        let db = sample();
        let by_name: Vec<u32> = db.search("MUSH", 10).iter().map(|i| i.id.raw()).collect();
        assert_eq!(by_name, vec![12]);

        let by_id: Vec<u32> = db.search("1", 10).iter().map(|i| i.id.raw()).collect();
        assert_eq!(by_id, vec![1, 12]);

        assert_eq!(db.search("", 2).len(), 2);
        assert!(db.search("nothing", 10).is_empty());
    }

    #[test]
    fn test_pools_containing() {
        let db = sample();
        assert_eq!(db.pools_containing(ItemId::new(12)), vec!["treasure", "boss"]);
        assert_eq!(db.pools_containing(ItemId::new(150)), vec!["treasure"]);
        assert!(db.pools_containing(ItemId::new(609)).is_empty());
    }
}
