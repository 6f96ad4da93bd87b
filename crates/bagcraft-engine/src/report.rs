//! Text and JSON output for the commands.

use std::io::{self, Write};

use bagcraft_common::ItemId;
use bagcraft_crafting::{
    Catalog, Component, Diagnostics, ItemRecord, ProbeOutcome, QualityRange, Recipe,
    RecipeIssue, RecipeRecord, SearchReport, SearchStats, SweepReport,
};
use serde::Serialize;

/// Name reported for a target missing from the item database.
const UNKNOWN_ITEM: &str = "Unknown Item";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CraftResponse<'a> {
    success: bool,
    components: &'a Recipe,
    seed: u32,
    item_id: ItemId,
    item_name: String,
    total_weight: u32,
    quality_range: QualityRange,
    item_quality: u8,
    warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse<'a> {
    success: bool,
    target_item_id: ItemId,
    target_item_name: &'a str,
    seed: u32,
    recipes: &'a [RecipeRecord],
    total_found: usize,
    stats: &'a SearchStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a Diagnostics>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepItem<'a> {
    item_id: ItemId,
    item_name: String,
    recipes: &'a [Recipe],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepResponse<'a> {
    success: bool,
    seed: u32,
    combinations: u64,
    leaves: usize,
    failed_leaves: usize,
    truncated: bool,
    items: Vec<SweepItem<'a>>,
}

#[derive(Serialize)]
struct PoolSummary<'a> {
    name: &'a str,
    size: usize,
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    success: bool,
    error: &'a str,
}

/// Writes command results as text or JSON.
pub struct Reporter<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter.
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    /// Returns the underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)
    }

    /// Result of a single craft.
    pub fn craft(
        &mut self,
        catalog: &Catalog,
        recipe: &Recipe,
        seed: u32,
        item: ItemId,
        issues: &[RecipeIssue],
    ) -> io::Result<()> {
        let weight = catalog.recipe_weight(recipe);
        if self.json {
            return self.write_json(&CraftResponse {
                success: true,
                components: recipe,
                seed,
                item_id: item,
                item_name: catalog.items.display_name(item),
                total_weight: weight,
                quality_range: catalog.quality_range(weight),
                item_quality: catalog.item_quality(item),
                warnings: issues.iter().map(ToString::to_string).collect(),
            });
        }

        for issue in issues {
            writeln!(self.out, "warning: {issue}")?;
        }
        let range = catalog.quality_range(weight);
        writeln!(self.out, "Recipe:  {}", catalog.format_recipe(recipe.slots()))?;
        writeln!(self.out, "Seed:    {seed}")?;
        writeln!(
            self.out,
            "Weight:  {weight} (quality {}-{})",
            range.min, range.max
        )?;
        writeln!(
            self.out,
            "Result:  {} ({})",
            item,
            catalog.items.display_name(item)
        )
    }

    /// Result of a target search.
    pub fn search(&mut self, catalog: &Catalog, report: &SearchReport) -> io::Result<()> {
        let target_name = catalog
            .items
            .get(report.target)
            .map_or(UNKNOWN_ITEM, |record| record.name.as_str());

        if self.json {
            return self.write_json(&SearchResponse {
                success: true,
                target_item_id: report.target,
                target_item_name: target_name,
                seed: report.seed,
                recipes: &report.records,
                total_found: report.total_found(),
                stats: &report.stats,
                diagnostics: report.diagnostics.as_ref(),
            });
        }

        writeln!(
            self.out,
            "Found {} recipes for {} ({}) after {} combinations",
            report.total_found(),
            report.target,
            target_name,
            report.stats.leaves_checked
        )?;
        for (index, record) in report.records.iter().enumerate() {
            writeln!(
                self.out,
                "{:>3}. {}  weight {} quality {}-{}",
                index + 1,
                record.formatted,
                record.weight,
                record.quality_range.min,
                record.quality_range.max
            )?;
        }
        if let Some(diagnostics) = &report.diagnostics {
            self.diagnostics(catalog, diagnostics)?;
        }
        Ok(())
    }

    fn diagnostics(&mut self, catalog: &Catalog, diagnostics: &Diagnostics) -> io::Result<()> {
        let describe = |outcome: &ProbeOutcome| match outcome {
            ProbeOutcome::Crafted { item } => {
                format!("{} ({})", item, catalog.items.display_name(*item))
            },
            ProbeOutcome::Failed { reason } => format!("error: {reason}"),
        };

        writeln!(self.out, "Diagnostics:")?;
        writeln!(
            self.out,
            "  {} -> {}",
            Recipe::EMPTY,
            describe(&diagnostics.empty_recipe)
        )?;
        writeln!(
            self.out,
            "  {} -> {}",
            diagnostics.reference_recipe,
            describe(&diagnostics.reference_outcome)
        )?;
        writeln!(
            self.out,
            "  Items reached by the first {} combinations:",
            diagnostics.leaves_sampled
        )?;
        for (item, count) in &diagnostics.histogram {
            writeln!(
                self.out,
                "    {} ({}): {}",
                item,
                catalog.items.display_name(*item),
                count
            )?;
        }
        if diagnostics.pools_containing_target.is_empty() {
            writeln!(self.out, "  Target is in no known pool")
        } else {
            writeln!(
                self.out,
                "  Target pools: {}",
                diagnostics.pools_containing_target.join(", ")
            )
        }
    }

    /// Result of a sweep.
    pub fn sweep(&mut self, catalog: &Catalog, report: &SweepReport) -> io::Result<()> {
        if self.json {
            let items = report
                .recipes
                .iter()
                .map(|(&item, recipes)| SweepItem {
                    item_id: item,
                    item_name: catalog.items.display_name(item),
                    recipes,
                })
                .collect();
            return self.write_json(&SweepResponse {
                success: true,
                seed: report.seed,
                combinations: report.combinations,
                leaves: report.leaves,
                failed_leaves: report.failed_leaves,
                truncated: report.truncated,
                items,
            });
        }

        writeln!(
            self.out,
            "{} items from {} of {} combinations",
            report.recipes.len(),
            report.leaves,
            report.combinations
        )?;
        for (item, recipes) in &report.recipes {
            writeln!(self.out, "{} ({})", item, catalog.items.display_name(*item))?;
            for recipe in recipes {
                writeln!(self.out, "    {}", catalog.format_recipe(recipe.slots()))?;
            }
        }
        Ok(())
    }

    /// Component table.
    pub fn components(&mut self, catalog: &Catalog) -> io::Result<()> {
        if self.json {
            let components: Vec<&Component> = catalog.components.iter().collect();
            return self.write_json(&serde_json::json!({ "components": components }));
        }
        for component in catalog.components.iter() {
            writeln!(
                self.out,
                "{:>3}  {:<16} weight {}",
                component.id, component.name, component.weight
            )?;
        }
        Ok(())
    }

    /// Item search results.
    pub fn items(&mut self, items: &[&ItemRecord]) -> io::Result<()> {
        if self.json {
            return self.write_json(&serde_json::json!({ "items": items }));
        }
        for item in items {
            writeln!(
                self.out,
                "{:>4}  {:<24} quality {}",
                item.id, item.name, item.quality
            )?;
        }
        Ok(())
    }

    /// Item pools with their sizes.
    pub fn pools(&mut self, catalog: &Catalog) -> io::Result<()> {
        let pools: Vec<PoolSummary<'_>> = catalog
            .items
            .pools()
            .iter()
            .map(|pool| PoolSummary {
                name: &pool.name,
                size: pool.members.len(),
            })
            .collect();
        if self.json {
            return self.write_json(&serde_json::json!({ "pools": pools }));
        }
        for pool in pools {
            writeln!(self.out, "{:<12} {} items", pool.name, pool.size)?;
        }
        Ok(())
    }

    /// A failed command. Text mode relies on the error log line alone.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        if !self.json {
            return Ok(());
        }
        self.write_json(&ErrorResponse {
            success: false,
            error: message,
        })
    }
}
