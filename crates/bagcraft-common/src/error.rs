//! Error types for catalog construction.

use thiserror::Error;

/// Errors raised while building the static catalog tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Catalog has no components
    #[error("Component catalog is empty")]
    EmptyComponents,

    /// Component ids must be exactly `0..K`
    #[error("Component ids must be contiguous from 0: expected {expected}, got {actual}")]
    NonContiguousComponent {
        /// Id expected at this position
        expected: u32,
        /// Id actually found
        actual: u32,
    },

    /// Quality or tier table has no entries
    #[error("{table} table is empty")]
    EmptyTable {
        /// Name of the table
        table: &'static str,
    },

    /// Ceilings must strictly ascend
    #[error("{table} ceilings must ascend: {previous} is followed by {next}")]
    CeilingOrder {
        /// Name of the table
        table: &'static str,
        /// Previous ceiling
        previous: u32,
        /// Offending ceiling
        next: u32,
    },

    /// The last band must be unbounded, and only the last
    #[error("{table} table must end with exactly one unbounded entry")]
    UnboundedPlacement {
        /// Name of the table
        table: &'static str,
    },

    /// Quality band with `min > max`
    #[error("Quality band {min}..{max} is inverted")]
    InvertedBand {
        /// Lower quality
        min: u8,
        /// Upper quality
        max: u8,
    },

    /// A crafting tier adds nothing to the tier below it
    #[error("Crafting tier {tier} is not a strict superset of the previous tier")]
    NotSuperset {
        /// Index of the offending tier
        tier: usize,
    },

    /// Seed alphabet is malformed
    #[error("Invalid seed alphabet: {0}")]
    InvalidAlphabet(String),

    /// Item registered twice
    #[error("Duplicate item ID: {0}")]
    DuplicateItem(u32),

    /// Unparseable schema version string
    #[error("Invalid schema version: {0}")]
    InvalidVersion(String),
}

/// Result type alias for catalog construction.
pub type CatalogResult<T> = Result<T, CatalogError>;
