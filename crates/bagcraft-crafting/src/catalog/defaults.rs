//! Built-in catalog tables.

use super::{Component, ItemPool, ItemRecord, QualityBand, TierSpec};

/// Component table: id, name, weight.
const COMPONENTS: &[(u32, &str, u32)] = &[
    (0, "Empty", 0),
    (1, "Red Heart", 1),
    (2, "Soul Heart", 4),
    (3, "Black Heart", 2),
    (4, "Eternal Heart", 2),
    (5, "Bone Heart", 3),
    (6, "Gold Heart", 2),
    (7, "Penny", 2),
    (8, "Nickel", 3),
    (9, "Dime", 4),
    (10, "Lucky Penny", 2),
    (11, "Key", 1),
    (12, "Golden Key", 3),
    (13, "Charged Key", 3),
    (14, "Bomb", 1),
    (15, "Golden Bomb", 2),
    (16, "Giga Bomb", 3),
    (17, "Micro Battery", 1),
    (18, "Lil Battery", 2),
    (19, "Mega Battery", 3),
    (20, "Card", 2),
    (21, "Pill", 2),
    (22, "Rune", 2),
    (23, "Dice Shard", 3),
    (24, "Cracked Key", 2),
    (25, "Poop", 1),
    (26, "Red Poop", 2),
    (27, "Gold Poop", 3),
    (28, "Rainbow Poop", 4),
    (29, "Lucky Poop", 2),
];

/// Quality bands: min, max, ceiling.
const QUALITY_BANDS: &[(u8, u8, Option<u32>)] = &[
    (0, 1, Some(8)),
    (1, 2, Some(14)),
    (1, 3, Some(18)),
    (0, 2, Some(22)),
    (1, 4, Some(26)),
    (2, 4, Some(30)),
    (3, 4, Some(34)),
    (4, 4, None),
];

/// Crafting tiers: ceiling and the inclusive id ranges each tier adds.
const CRAFTING_TIERS: &[(Option<u32>, &[(u32, u32)])] = &[
    (Some(3), &[(15, 20), (22, 75)]),
    (Some(7), &[(76, 112)]),
    (Some(15), &[(113, 144), (601, 666)]),
    (None, &[(145, 176), (667, 732)]),
];

/// Named items: id, name, quality.
const ITEMS: &[(u32, &str, u8)] = &[
    (1, "Sad Onion", 2),
    (2, "Inner Eye", 3),
    (3, "Spoon Bender", 3),
    (4, "Cricket's Head", 4),
    (5, "My Reflection", 1),
    (6, "Number One", 2),
    (7, "Blood of the Martyr", 3),
    (8, "Brother Bobby", 1),
    (9, "Skatole", 0),
    (10, "Halo of Flies", 2),
    (11, "1up!", 3),
    (12, "Magic Mushroom", 4),
    (13, "The Virus", 2),
    (14, "Roid Rage", 1),
    (15, "<3", 1),
    (16, "Raw Liver", 1),
    (17, "Skeleton Key", 2),
    (18, "A Dollar", 2),
    (19, "Boom!", 1),
    (20, "Transcendence", 2),
    (21, "The Compass", 1),
    (22, "Lunch", 0),
    (23, "Dinner", 0),
    (24, "Dessert", 0),
    (25, "Breakfast", 0),
    (26, "Rotten Meat", 0),
    (27, "Wooden Spoon", 1),
    (28, "The Belt", 0),
    (29, "Mom's Underwear", 0),
    (30, "Mom's Heels", 1),
    (105, "The D6", 4),
    (609, "Eternal D6", 4),
];

/// Item pools: name and inclusive id range.
const POOLS: &[(&str, u32, u32)] = &[("treasure", 1, 200), ("shop", 201, 300), ("boss", 301, 350)];

pub(super) fn components() -> Vec<Component> {
    COMPONENTS
        .iter()
        .map(|&(id, name, weight)| Component::new(id, name, weight))
        .collect()
}

pub(super) fn quality_bands() -> Vec<QualityBand> {
    QUALITY_BANDS
        .iter()
        .map(|&(min, max, ceiling)| QualityBand { min, max, ceiling })
        .collect()
}

pub(super) fn crafting_tiers() -> Vec<TierSpec> {
    CRAFTING_TIERS
        .iter()
        .map(|&(ceiling, ranges)| {
            TierSpec::new(ceiling, ranges.iter().flat_map(|&(lo, hi)| lo..=hi))
        })
        .collect()
}

pub(super) fn items() -> Vec<ItemRecord> {
    ITEMS
        .iter()
        .map(|&(id, name, quality)| ItemRecord::new(id, name, quality))
        .collect()
}

pub(super) fn pools() -> Vec<ItemPool> {
    POOLS
        .iter()
        .map(|&(name, lo, hi)| ItemPool::new(name, lo..=hi))
        .collect()
}
