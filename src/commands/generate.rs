//! `relgen` (no subcommand) - annotate every item with related content
//!
//! Loads both collections, scores every pair by tag overlap, and writes
//! `relatedProducts` / `relatedBlogs` back into each record. Individual bad
//! records are reported and skipped; the run itself still succeeds.

use tracing::debug;

use crate::cli::{GenerateArgs, OutputFormat};
use crate::commands::dispatch::{Command, CommandContext};
use relgen_core::annotate::{interrupt_flag, Annotator, CollectionSummary, ItemStatus, RunSummary};
use relgen_core::config::ConfigOverrides;
use relgen_core::error::{RelgenError, Result};
use relgen_core::item::CollectionKind;
use relgen_core::store::DirectoryStore;

impl Command for GenerateArgs {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let config = ctx.run_config(ConfigOverrides {
            k_products: self.k_products,
            k_blogs: self.k_blogs,
            min_score: self.min_score,
            dry_run: self.dry_run,
            ..Default::default()
        })?;
        debug!(elapsed = ?ctx.start.elapsed(), ?config, "resolve_config");

        let products = DirectoryStore::new(CollectionKind::Products, &config.products_dir);
        let blogs = DirectoryStore::new(CollectionKind::Blogs, &config.blogs_dir);

        let summary = Annotator::new(&products, &blogs, &config)
            .with_interrupt(interrupt_flag())
            .run()?;

        match ctx.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Human => print_human(&summary, ctx.cli.quiet),
        }

        debug!(elapsed = ?ctx.start.elapsed(), "generate");

        if summary.interrupted {
            return Err(RelgenError::Interrupted);
        }
        Ok(())
    }
}

fn print_human(summary: &RunSummary, quiet: bool) {
    if !quiet {
        let verb = if summary.dry_run {
            "would update"
        } else {
            "updated"
        };
        for item in &summary.items {
            match (item.status, &item.reason) {
                (ItemStatus::Updated, _) => println!("{verb} {}/{}", item.collection, item.id),
                (ItemStatus::Skipped, Some(reason)) => {
                    println!("skipped {}/{}: {reason}", item.collection, item.id)
                }
                (ItemStatus::Failed, Some(reason)) => {
                    println!("failed {}/{}: {reason}", item.collection, item.id)
                }
                (status, None) => println!("{status:?} {}/{}", item.collection, item.id),
            }
        }
        if !summary.items.is_empty() {
            println!();
        }
    }

    for kind in CollectionKind::ALL {
        println!("{}", collection_line(summary.collection(kind)));
    }
    if summary.dry_run {
        println!("Dry run: no records were written.");
    }
    if summary.interrupted {
        println!("Interrupted: rerun to finish the remaining records.");
    }
}

fn collection_line(summary: &CollectionSummary) -> String {
    let name = match summary.collection {
        CollectionKind::Products => "Products",
        CollectionKind::Blogs => "Blogs",
    };
    match &summary.unavailable {
        Some(reason) => format!("{name}: collection unavailable, treated as empty ({reason})"),
        None => format!(
            "{name}: {} updated, {} skipped, {} failed ({})",
            summary.updated, summary.skipped, summary.failed, summary.location
        ),
    }
}
