//! Catalog file loading.
//!
//! This module provides:
//! - Parsing catalog tables from TOML
//! - Schema version checks
//! - Per-section fallback to the built-in tables
//! - Validation through the catalog constructors

use std::fs;
use std::path::{Path, PathBuf};

use bagcraft_common::{CatalogError, SchemaVersion};
use bagcraft_crafting::{
    Catalog, Component, ComponentCatalog, CraftingTiers, ItemDatabase, ItemPool, ItemRecord,
    QualityBand, QualityBands, SeedAlphabet, TierSpec,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during catalog loading.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// File not found.
    #[error("Catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read catalog file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Tables rejected by the catalog constructors.
    #[error("Catalog validation error: {0}")]
    Validation(#[from] CatalogError),

    /// Inclusive id range with `lo > hi`.
    #[error("Invalid id range [{lo}, {hi}] in {section}")]
    InvalidRange {
        /// Section holding the range
        section: String,
        /// Range start
        lo: u32,
        /// Range end
        hi: u32,
    },

    /// File written for an unsupported schema major version.
    #[error("Catalog version {found} cannot be read (supported: {supported})")]
    VersionMismatch {
        /// Version in the file
        found: SchemaVersion,
        /// Version this build reads
        supported: SchemaVersion,
    },
}

/// Result type for catalog loading operations.
pub type CatalogLoadResult<T> = Result<T, CatalogLoadError>;

/// A crafting tier from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierDefinition {
    /// Largest total served (None = unbounded).
    #[serde(default)]
    pub ceiling: Option<u32>,
    /// Item ids this tier adds.
    #[serde(default)]
    pub ids: Vec<u32>,
    /// Inclusive `[lo, hi]` id ranges this tier adds.
    #[serde(default)]
    pub ranges: Vec<[u32; 2]>,
}

/// An item pool from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolDefinition {
    /// Pool name.
    pub name: String,
    /// Member ids.
    #[serde(default)]
    pub ids: Vec<u32>,
    /// Inclusive `[lo, hi]` member ranges.
    #[serde(default)]
    pub ranges: Vec<[u32; 2]>,
}

/// A whole catalog file. Empty sections use the built-in tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// File format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Seed alphabet; an empty string selects the fallback seed hash.
    #[serde(default)]
    pub seed_alphabet: Option<String>,
    /// Component table.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Quality band table.
    #[serde(default)]
    pub quality_bands: Vec<QualityBand>,
    /// Crafting tier table.
    #[serde(default)]
    pub crafting_tiers: Vec<TierDefinition>,
    /// Item metadata.
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    /// Item pools.
    #[serde(default)]
    pub pools: Vec<PoolDefinition>,
}

fn default_version() -> String {
    SchemaVersion::CATALOG.to_string()
}

fn expand(section: &str, ids: &[u32], ranges: &[[u32; 2]]) -> CatalogLoadResult<Vec<u32>> {
    let mut out = ids.to_vec();
    for &[lo, hi] in ranges {
        if lo > hi {
            return Err(CatalogLoadError::InvalidRange {
                section: section.to_string(),
                lo,
                hi,
            });
        }
        out.extend(lo..=hi);
    }
    Ok(out)
}

impl CatalogFile {
    /// Parses a catalog file from TOML text.
    pub fn parse(content: &str) -> CatalogLoadResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Checks the schema version against this build.
    pub fn schema_version(&self) -> CatalogLoadResult<SchemaVersion> {
        let found: SchemaVersion = self.version.parse()?;
        if !SchemaVersion::CATALOG.can_read(&found) {
            return Err(CatalogLoadError::VersionMismatch {
                found,
                supported: SchemaVersion::CATALOG,
            });
        }
        Ok(found)
    }

    /// Builds and validates the catalog.
    pub fn into_catalog(self) -> CatalogLoadResult<Catalog> {
        let version = self.schema_version()?;

        let components = if self.components.is_empty() {
            debug!("No components in file, using built-in table");
            Catalog::builtin_components()
        } else {
            self.components
        };

        let bands = if self.quality_bands.is_empty() {
            debug!("No quality bands in file, using built-in table");
            Catalog::builtin_quality_bands()
        } else {
            self.quality_bands
        };

        let tiers = if self.crafting_tiers.is_empty() {
            debug!("No crafting tiers in file, using built-in table");
            Catalog::builtin_tiers()
        } else {
            self.crafting_tiers
                .iter()
                .enumerate()
                .map(|(index, tier)| -> CatalogLoadResult<TierSpec> {
                    let section = format!("crafting_tiers[{index}]");
                    Ok(TierSpec::new(tier.ceiling, expand(&section, &tier.ids, &tier.ranges)?))
                })
                .collect::<CatalogLoadResult<Vec<_>>>()?
        };

        let records = if self.items.is_empty() {
            Catalog::builtin_items()
        } else {
            self.items
        };
        let pools = if self.pools.is_empty() {
            Catalog::builtin_pools()
        } else {
            self.pools
                .iter()
                .map(|pool| -> CatalogLoadResult<ItemPool> {
                    let section = format!("pools.{}", pool.name);
                    Ok(ItemPool::new(&pool.name, expand(&section, &pool.ids, &pool.ranges)?))
                })
                .collect::<CatalogLoadResult<Vec<_>>>()?
        };

        let mut items = ItemDatabase::new();
        for record in records {
            items.register(record)?;
        }
        for pool in pools {
            items.add_pool(pool);
        }

        let alphabet = match self.seed_alphabet.as_deref() {
            None => Some(SeedAlphabet::STANDARD),
            Some("") => None,
            Some(symbols) => Some(SeedAlphabet::new(symbols)?),
        };

        let mut catalog = Catalog::new(
            ComponentCatalog::new(components)?,
            QualityBands::new(&bands)?,
            CraftingTiers::new(&tiers)?,
            items,
        )
        .with_seed_alphabet(alphabet);
        catalog.version = version;
        Ok(catalog)
    }
}

/// Loads a catalog file from disk.
pub fn load_catalog(path: &Path) -> CatalogLoadResult<Catalog> {
    if !path.exists() {
        return Err(CatalogLoadError::NotFound(path.to_path_buf()));
    }
    debug!("Loading catalog file: {:?}", path);

    let content = fs::read_to_string(path)?;
    let catalog = CatalogFile::parse(&content)?.into_catalog()?;

    info!(
        "Loaded catalog v{} from {:?}: {} components, {} tiers, {} items, {} pools",
        catalog.version,
        path,
        catalog.components.len(),
        catalog.tiers.len(),
        catalog.items.len(),
        catalog.items.pools().len()
    );
    Ok(catalog)
}

/// Loads the catalog at `path`, or the built-in tables when `path` is `None`.
pub fn load_or_builtin(path: Option<&Path>) -> CatalogLoadResult<Catalog> {
    match path {
        Some(path) => load_catalog(path),
        None => {
            info!("Using built-in catalog");
            Ok(Catalog::builtin()?)
        },
    }
}
