//! Engine configuration.
//!
//! Search limits, seed and catalog defaults, and logging format.
//! Configuration can be loaded from and saved to a file.

use bagcraft_crafting::{
    Recipe, SearchLimits, Seed, DEFAULT_MAX_PER_ITEM, DEFAULT_MAX_RECIPES, DIAGNOSTIC_LEAF_CAP,
    LEAF_CAP, REFERENCE_RECIPE, SWEEP_LEAF_CAP,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration file name.
const CONFIG_FILE: &str = "bagcraft.toml";

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        /// Config file
        path: PathBuf,
        /// I/O failure
        source: io::Error,
    },

    /// Failed to parse TOML.
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// Config file
        path: PathBuf,
        /// TOML failure
        source: toml::de::Error,
    },
}

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Catalog ===
    /// Catalog file (None = built-in tables)
    pub catalog_path: Option<PathBuf>,

    // === Search ===
    /// Seed used when a command gives none
    pub default_seed: Option<Seed>,
    /// Recipes returned by a search
    pub max_recipes: usize,
    /// Leaves walked by a search (1-10000)
    pub leaf_cap: usize,
    /// Leaves sampled by diagnostics (1-1000)
    pub diagnostic_leaf_cap: usize,
    /// Leaves walked by a sweep
    pub sweep_leaf_cap: usize,
    /// Recipes kept per item by a sweep
    pub max_recipes_per_item: usize,

    // === Diagnostics ===
    /// Probe the catalog when a search finds nothing
    pub run_diagnostics: bool,
    /// Literal recipe probed by diagnostics
    pub reference_recipe: [u32; 8],

    // === Logging ===
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,

            default_seed: None,
            max_recipes: DEFAULT_MAX_RECIPES,
            leaf_cap: LEAF_CAP,
            diagnostic_leaf_cap: DIAGNOSTIC_LEAF_CAP,
            sweep_leaf_cap: SWEEP_LEAF_CAP,
            max_recipes_per_item: DEFAULT_MAX_PER_ITEM,

            run_diagnostics: true,
            reference_recipe: REFERENCE_RECIPE,

            log_json: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    ///
    /// Nothing is logged here; callers fall back to defaults on error and
    /// report it once logging is up.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let mut contents = String::new();
        fs::File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = toml::from_str::<Self>(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate();
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        match dirs::config_dir() {
            Some(config_dir) => config_dir.join("bagcraft").join(CONFIG_FILE),
            None => PathBuf::from(CONFIG_FILE),
        }
    }

    /// Validate and clamp configuration values to supported ranges.
    pub fn validate(&mut self) {
        self.leaf_cap = self.leaf_cap.clamp(1, LEAF_CAP);
        self.diagnostic_leaf_cap = self.diagnostic_leaf_cap.clamp(1, DIAGNOSTIC_LEAF_CAP);
        self.sweep_leaf_cap = self.sweep_leaf_cap.max(1);
        self.max_recipes_per_item = self.max_recipes_per_item.max(1);
    }

    /// Search limits derived from this configuration.
    #[must_use]
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            leaf_cap: self.leaf_cap,
            diagnostic_leaf_cap: self.diagnostic_leaf_cap,
            sweep_leaf_cap: self.sweep_leaf_cap,
            reference_recipe: Recipe::new(self.reference_recipe.map(Into::into)),
            run_diagnostics: self.run_diagnostics,
        }
        .clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_recipes, 20);
        assert_eq!(config.leaf_cap, 10_000);
        assert_eq!(config.diagnostic_leaf_cap, 1_000);
        assert_eq!(config.reference_recipe, [0, 1, 5, 8, 20, 0, 0, 0]);
        assert!(config.run_diagnostics);
        assert!(!config.log_json);
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig {
            leaf_cap: 50_000,
            diagnostic_leaf_cap: 0,
            max_recipes_per_item: 0,
            ..EngineConfig::default()
        };

        config.validate();

        assert_eq!(config.leaf_cap, 10_000);
        assert_eq!(config.diagnostic_leaf_cap, 1);
        assert_eq!(config.max_recipes_per_item, 1);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        let config = EngineConfig {
            default_seed: Some(Seed::from("2LP2D89M")),
            max_recipes: 5,
            log_json: true,
            ..EngineConfig::default()
        };

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_numeric_seed() {
        let config: EngineConfig = toml::from_str("default_seed = 12345").expect("parse");
        assert_eq!(config.default_seed, Some(Seed::Numeric(12_345)));
        assert_eq!(config.max_recipes, 20);
    }

    #[test]
    fn test_config_load_clamps() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bagcraft.toml");
        fs::write(&config_path, "leaf_cap = 999999\n").expect("write");

        let loaded = EngineConfig::load_from(&config_path).expect("load");
        assert_eq!(loaded.leaf_cap, 10_000);
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = EngineConfig::load_from("/nonexistent/path/config.toml").expect_err("missing");
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_config_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "max_recipes = \"many\"").expect("write");

        let err = EngineConfig::load_from(&config_path).expect_err("invalid");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_search_limits() {
        let config = EngineConfig {
            run_diagnostics: false,
            reference_recipe: [1; 8],
            ..EngineConfig::default()
        };
        let limits = config.search_limits();
        assert!(!limits.run_diagnostics);
        assert_eq!(limits.reference_recipe.raw(), [1; 8]);
        assert_eq!(limits.leaf_cap, 10_000);
    }
}
