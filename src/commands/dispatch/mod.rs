//! Command dispatch logic for relgen

use std::time::Instant;

use crate::cli::paths::resolve_root_path;
use crate::cli::{Cli, Commands};
use relgen_core::error::Result;
use tracing::debug;

mod command;

pub use command::{Command, CommandContext};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root_path(cli.root.clone());

    debug!(elapsed = ?start.elapsed(), root = %root.display(), format = %cli.format, "resolve_root");

    let ctx = CommandContext::new(cli, &root, start);

    match &cli.command {
        None => cli.generate.execute(&ctx),
        Some(Commands::Split(args)) => args.execute(&ctx),
    }
}
