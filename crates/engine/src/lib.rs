//! Semantic linkers for feature graphs.
//!
//! Each pass walks one compilation unit and adds edges to a graph that
//! already holds the syntactic skeleton. Passes never remove anything and
//! never fail: missing facts, missing nodes and ambiguous token resolution
//! are skipped and counted in [`LinkStats`].

use ir::{AnalysisResults, FeatureGraph, SyntaxTree};

pub mod config;
pub mod dataflow;
pub mod link;
pub mod returns;
pub mod scan;
pub mod stats;

pub use config::{LinkerConfig, Pass, ReturnMode};
pub use dataflow::link_dataflow_edges;
pub use link::{link_tokens, link_tokens_to_node, LinkOutcome};
pub use returns::link_returns_to;
pub use scan::ScanContext;
pub use stats::LinkStats;

/// Runs the passes enabled in `config` over one compilation unit.
pub fn link_unit(
    unit: &SyntaxTree,
    analysis: &AnalysisResults,
    graph: &mut FeatureGraph,
    config: &LinkerConfig,
) -> LinkStats {
    let mut stats = LinkStats::default();
    if config.runs(Pass::Dataflow) {
        stats += link_dataflow_edges(unit, analysis, graph, config);
    }
    if config.runs(Pass::ReturnsTo) {
        stats += link_returns_to(unit, graph, config);
    }
    stats
}
