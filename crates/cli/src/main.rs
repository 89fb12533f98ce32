//! Entry point for the command-line interface.

use featgraph::args::{parse_cli, Commands};
use featgraph::link::{run_check, run_link};

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    match cli.command {
        Commands::Link(args) => run_link(args),
        Commands::Check(args) => run_check(args),
    }
}
