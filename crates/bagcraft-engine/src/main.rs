//! # bagcraft
//!
//! Command line entry point for the bagcraft recipe finder.
//!
//! This crate ties together:
//! - Configuration: search limits, default seed, catalog path
//! - Catalog loading: built-in tables or a TOML catalog file
//! - Crafting: single crafts, target searches and sweeps
//! - Reporting: text or JSON output

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod catalog_loader;
mod cli;
mod config;
mod report;

use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use bagcraft_crafting::{Recipe, RecipeEngine, SearchRequest};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::{parse_components, resolve_candidates, resolve_target, Cli, Command};
use crate::config::{ConfigError, EngineConfig};
use crate::report::Reporter;

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(EngineConfig::config_path);
    let (config, load_error) = load_config(&config_path);

    if let Err(e) = init_tracing(config.log_json) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!("bagcraft {}", env!("CARGO_PKG_VERSION"));
    match load_error {
        None => info!("Loaded config from {}", config_path.display()),
        Some(ConfigError::NotFound(_)) => info!("Config file not found, using defaults"),
        Some(e) => warn!("{e}; using defaults"),
    }

    let mut reporter = Reporter::new(io::stdout().lock(), cli.json);
    match run(&cli, &config, &mut reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            // Nothing more to report if stdout itself is gone
            let _ = reporter.error(&format!("{e:#}"));
            ExitCode::FAILURE
        },
    }
}

/// Loads the configuration, falling back to defaults.
///
/// The load error is handed back so it can be logged after [`init_tracing`].
fn load_config(path: &Path) -> (EngineConfig, Option<ConfigError>) {
    match EngineConfig::load_from(path) {
        Ok(config) => (config, None),
        Err(e) => (EngineConfig::default(), Some(e)),
    }
}

/// Installs the log subscriber. Logs go to stderr so JSON output stays clean.
fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("bagcraft=info".parse()?);
    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json().with_writer(io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(io::stderr)))
        .with(filter)
        .try_init()?;
    Ok(())
}

fn run<W: io::Write>(cli: &Cli, config: &EngineConfig, reporter: &mut Reporter<W>) -> Result<()> {
    if let Command::InitConfig = cli.command {
        let path = cli.config.clone().unwrap_or_else(EngineConfig::config_path);
        config
            .save_to(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(());
    }

    let catalog_path = cli.catalog.as_deref().or(config.catalog_path.as_deref());
    let catalog = catalog_loader::load_or_builtin(catalog_path).context("Failed to load catalog")?;
    let engine = RecipeEngine::with_limits(Arc::new(catalog), config.search_limits());
    let catalog = engine.catalog();

    match &cli.command {
        Command::Craft { components, seed } => {
            let ids = parse_components(components, catalog)?;
            let raw: Vec<u32> = ids.iter().map(|id| id.raw()).collect();
            let issues = catalog.validate_recipe(&raw);
            let recipe = Recipe::from_slice(&ids)?;
            let seed = engine
                .bag()
                .normalize_seed(seed.resolve(config.default_seed.as_ref()).as_ref());
            let item = engine.bag().craft_recipe(&recipe, seed)?;
            reporter.craft(catalog, &recipe, seed, item, &issues)?;
        },
        Command::Search {
            components,
            filter,
            target,
            target_name,
            max,
            seed,
        } => {
            let request = SearchRequest {
                components: resolve_candidates(components.as_deref(), filter, catalog)?,
                target: resolve_target(*target, target_name.as_deref(), catalog)?,
                max_recipes: max.unwrap_or(config.max_recipes),
                seed: seed.resolve(config.default_seed.as_ref()),
            };
            let report = engine.find_recipes(&request)?;
            reporter.search(catalog, &report)?;
        },
        Command::Sweep {
            components,
            filter,
            max_per_item,
            seed,
        } => {
            let ids = resolve_candidates(components.as_deref(), filter, catalog)?;
            let seed = seed.resolve(config.default_seed.as_ref());
            let report = engine.sweep(
                &ids,
                max_per_item.unwrap_or(config.max_recipes_per_item),
                seed.as_ref(),
            )?;
            reporter.sweep(catalog, &report)?;
        },
        Command::Components => reporter.components(catalog)?,
        Command::Items { query, limit } => {
            let items = catalog.items.search(query.as_deref().unwrap_or_default(), *limit);
            reporter.items(&items)?;
        },
        Command::Pools => reporter.pools(catalog)?,
        Command::InitConfig => {},
    }
    Ok(())
}
