//! `relgen split` - seed the collections from a combined export

use tracing::debug;

use crate::cli::{OutputFormat, SplitArgs};
use crate::commands::dispatch::{Command, CommandContext};
use relgen_core::config::{resolve_against, ConfigOverrides};
use relgen_core::error::Result;
use relgen_core::item::CollectionKind;
use relgen_core::split::{split_file, SplitCounts};
use relgen_core::store::DirectoryStore;

impl Command for SplitArgs {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let config = ctx.run_config(ConfigOverrides::default())?;

        let input = resolve_against(ctx.root, &self.input);
        let products = DirectoryStore::new(CollectionKind::Products, &config.products_dir);
        let blogs = DirectoryStore::new(CollectionKind::Blogs, &config.blogs_dir);
        products.create()?;
        blogs.create()?;

        let summary = split_file(&input, &products, &blogs)?;
        debug!(elapsed = ?ctx.start.elapsed(), entries = summary.entries, "split");

        match ctx.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Human => {
                println!("Entries processed: {}", summary.entries);
                print_counts("Products", &summary.products, &products);
                print_counts("Blogs", &summary.blogs, &blogs);
            }
        }

        Ok(())
    }
}

fn print_counts(name: &str, counts: &SplitCounts, store: &DirectoryStore) {
    println!(
        "{name}: {} written, {} skipped, {} failed ({})",
        counts.written,
        counts.skipped,
        counts.failed,
        store.dir().display()
    );
}
