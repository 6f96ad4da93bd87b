//! Command line arguments.

use std::path::PathBuf;

use anyhow::{bail, Result};
use bagcraft_common::{ComponentId, ItemId};
use bagcraft_crafting::{Catalog, ComponentFilter, Seed, DEFAULT_SEARCH_LIMIT};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Seeded bag-of-crafting recipe finder", long_about = None)]
pub struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file overriding the configured one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Craft one eight-component recipe
    Craft {
        /// Comma-separated component ids or names
        #[arg(long)]
        components: String,

        #[command(flatten)]
        seed: SeedArgs,
    },

    /// Find recipes crafting a target item
    Search {
        /// Comma-separated candidate component ids or names
        #[arg(long, conflicts_with_all = FILTER_FLAGS)]
        components: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Target item id
        #[arg(long, conflicts_with = "target_name", required_unless_present = "target_name")]
        target: Option<u32>,

        /// Target item name (case-insensitive)
        #[arg(long)]
        target_name: Option<String>,

        /// Maximum recipes to return (default: configured)
        #[arg(long)]
        max: Option<usize>,

        #[command(flatten)]
        seed: SeedArgs,
    },

    /// Craft every component multiset and group recipes by item
    Sweep {
        /// Comma-separated candidate component ids or names
        #[arg(long, conflicts_with_all = FILTER_FLAGS)]
        components: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Recipes kept per item (default: configured)
        #[arg(long)]
        max_per_item: Option<usize>,

        #[command(flatten)]
        seed: SeedArgs,
    },

    /// List crafting components
    Components,

    /// List or search items
    Items {
        /// Substring of the name or id
        #[arg(long)]
        query: Option<String>,

        /// Maximum items listed
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },

    /// List item pools
    Pools,

    /// Write the current configuration to the config file
    InitConfig,
}

/// Filter flags replaced by an explicit `--components` list.
const FILTER_FLAGS: [&str; 4] = ["include", "exclude", "min_weight", "max_weight"];

/// Candidate selection from the catalog, used when `--components` is absent.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only these components (comma-separated ids or names)
    #[arg(long)]
    pub include: Option<String>,

    /// Never these components (comma-separated ids or names)
    #[arg(long)]
    pub exclude: Option<String>,

    /// Lowest component weight
    #[arg(long)]
    pub min_weight: Option<u32>,

    /// Highest component weight
    #[arg(long)]
    pub max_weight: Option<u32>,
}

impl FilterArgs {
    /// Builds the component filter these flags describe.
    pub fn to_filter(&self, catalog: &Catalog) -> Result<ComponentFilter> {
        let mut filter = ComponentFilter::all();
        if let Some(list) = &self.include {
            filter = filter.including(parse_components(list, catalog)?);
        }
        if let Some(list) = &self.exclude {
            filter = filter.excluding(parse_components(list, catalog)?);
        }
        filter.min_weight = self.min_weight;
        filter.max_weight = self.max_weight;
        Ok(filter)
    }
}

/// Search candidates: the explicit list, else every component the filter accepts.
pub fn resolve_candidates(
    components: Option<&str>,
    filter: &FilterArgs,
    catalog: &Catalog,
) -> Result<Vec<ComponentId>> {
    match components {
        Some(list) => parse_components(list, catalog),
        None => Ok(filter.to_filter(catalog)?.apply(&catalog.components)),
    }
}

/// Seed selection shared by the crafting commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SeedArgs {
    /// Run seed, e.g. 2LP2D89M
    #[arg(long, conflicts_with = "numeric_seed")]
    pub seed: Option<String>,

    /// Already-normalized numeric seed
    #[arg(long)]
    pub numeric_seed: Option<u32>,
}

impl SeedArgs {
    /// The seed given on the command line, else `fallback`.
    pub fn resolve(&self, fallback: Option<&Seed>) -> Option<Seed> {
        match (&self.seed, self.numeric_seed) {
            (Some(text), _) => Some(Seed::from(text.as_str())),
            (None, Some(value)) => Some(Seed::Numeric(value)),
            (None, None) => fallback.cloned(),
        }
    }
}

/// Parses a comma-separated list of component ids or names.
pub fn parse_components(list: &str, catalog: &Catalog) -> Result<Vec<ComponentId>> {
    let mut ids = Vec::new();
    for token in list.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        let id = match token.parse::<u32>() {
            Ok(raw) => ComponentId::new(raw),
            Err(_) => match catalog.components.id_by_name(token) {
                Some(id) => id,
                None => bail!("Unknown component: {token}"),
            },
        };
        ids.push(id);
    }
    Ok(ids)
}

/// Resolves the search target from an id or a name.
pub fn resolve_target(
    target: Option<u32>,
    target_name: Option<&str>,
    catalog: &Catalog,
) -> Result<ItemId> {
    if let Some(raw) = target {
        return Ok(ItemId::new(raw));
    }
    let Some(name) = target_name else {
        bail!("Missing target: pass --target or --target-name");
    };
    match catalog.items.id_by_name(name) {
        Some(id) => Ok(id),
        None => bail!("Item '{name}' not found"),
    }
}
