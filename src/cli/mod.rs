//! CLI argument parsing for relgen
//!
//! Running `relgen` with no subcommand generates related content using the
//! well-known collection locations under the root directory.

pub mod args;
pub mod output;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{GenerateArgs, SplitArgs};
pub use output::OutputFormat;

/// Relgen - related products and blogs for JSON content collections
#[derive(Parser, Debug)]
#[command(name = "relgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Site root; collection paths are resolved against it
    #[arg(long, global = true, env = "RELGEN_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file (defaults to relgen.toml in the root, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Products collection directory
    #[arg(long, global = true)]
    pub products_dir: Option<PathBuf>,

    /// Blogs collection directory
    #[arg(long, global = true)]
    pub blogs_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress per-item output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "debug", "relgen_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(flatten)]
    pub generate: GenerateArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a combined data.json export into per-item product and blog records
    Split(SplitArgs),
}
