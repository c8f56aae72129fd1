//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use relgen_core::bail_usage;
use relgen_core::config::{ConfigOverrides, FileConfig, RunConfig};
use relgen_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// Resolve run configuration from the config file and CLI flags.
    ///
    /// Collection directories come from the global flags; `overrides`
    /// carries everything else. Products and blogs must not share a
    /// directory.
    pub fn run_config(&self, overrides: ConfigOverrides) -> Result<RunConfig> {
        let file = FileConfig::discover(self.root, self.cli.config.as_deref())?;
        let overrides = ConfigOverrides {
            products_dir: self.cli.products_dir.clone(),
            blogs_dir: self.cli.blogs_dir.clone(),
            ..overrides
        };
        let config = RunConfig::resolve(self.root, file.as_ref(), &overrides)?;
        if config.products_dir == config.blogs_dir {
            bail_usage!("products and blogs must live in different directories");
        }
        Ok(config)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}
