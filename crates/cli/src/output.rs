use clap::ValueEnum;
use engine::LinkStats;
use ir::EdgeType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::ui;

/// Supported output formats for the link summary.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
pub struct UnitReport {
    pub path: PathBuf,
    pub nodes: usize,
    /// Edge totals per kind after linking.
    pub edges: BTreeMap<EdgeType, usize>,
    pub stats: LinkStats,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub units: Vec<UnitReport>,
    pub failed: Vec<FailedUnit>,
    pub total: LinkStats,
}

#[derive(Debug, Serialize)]
pub struct FailedUnit {
    pub path: PathBuf,
    pub error: String,
}

pub fn print_summary(summary: &Summary, fmt: Format) -> anyhow::Result<()> {
    match fmt {
        Format::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        Format::Text => print_text(summary),
    }
    Ok(())
}

fn print_text(summary: &Summary) {
    for unit in &summary.units {
        ui::print_success("LINKED", &unit.path.display().to_string());
        let edges: Vec<String> = unit
            .edges
            .iter()
            .map(|(kind, count)| format!("{kind}={count}"))
            .collect();
        println!("  nodes={} {}", unit.nodes, edges.join(" "));
        println!(
            "  added={} existing={} ambiguous={} missing_nodes={}",
            unit.stats.edges_added,
            unit.stats.edges_existing,
            unit.stats.ambiguous_tokens,
            unit.stats.missing_feature_node
        );
    }
    for failed in &summary.failed {
        ui::print_error("FAILED", &format!("{}: {}", failed.path.display(), failed.error));
    }
    let t = &summary.total;
    println!(
        "{} unit(s) linked, {} failed: {} edge(s) added, {} ambiguous resolution(s), {} site(s) outside methods, {} unanalysed",
        summary.units.len(),
        summary.failed.len(),
        t.edges_added,
        t.ambiguous_tokens,
        t.skipped_outside_method,
        t.skipped_unanalyzed
    );
}
