use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::Format;

fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn parse_threads(s: &str) -> Result<usize, String> {
    let v: usize = s
        .parse()
        .map_err(|e: std::num::ParseIntError| e.to_string())?;
    if v == 0 {
        Err("threads must be greater than 0".into())
    } else {
        Ok(v)
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Links dataflow and return-flow edges into feature graphs",
    long_about = "featgraph takes compilation units whose feature graph already holds the syntactic skeleton, adds LAST_WRITE, LAST_USE and RETURNS_TO edges, and reports what was linked.

Examples:
  featgraph link unit.json                   # Link one unit
  featgraph link a.json b.yaml --format json # Link several units, JSON summary
  featgraph check unit.json                  # Validate a unit without linking",
    subcommand_required = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add semantic edges to one or more units
    Link(LinkArgs),
    /// Load and validate units without linking
    Check(CheckArgs),
}

#[derive(ClapArgs)]
pub struct LinkArgs {
    /// Unit files (JSON, or YAML with a .yaml/.yml extension)
    #[arg(required = true)]
    pub units: Vec<PathBuf>,
    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output format for the summary
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// Number of units linked in parallel
    #[arg(long, default_value_t = default_threads(), value_parser = parse_threads)]
    pub threads: usize,
    /// Write the linked unit back as JSON (single unit only)
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
    /// Suppress non-essential output
    #[arg(long)]
    pub quiet: bool,
}

#[derive(ClapArgs)]
pub struct CheckArgs {
    /// Unit files to validate
    #[arg(required = true)]
    pub units: Vec<PathBuf>,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
