//! `LAST_WRITE` / `LAST_USE` edges from precomputed dataflow facts.

use crate::config::LinkerConfig;
use crate::link::Linker;
use crate::scan::ScanContext;
use crate::stats::LinkStats;
use ir::{
    AnalysisResults, DataflowOutputs, EdgeType, FactKind, FeatureGraph, SyntaxTree, TreeId,
    TreeKind,
};
use tracing::{debug, trace};

const FACTS: [(FactKind, EdgeType); 2] = [
    (FactKind::LastWrite, EdgeType::LastWrite),
    (FactKind::LastUse, EdgeType::LastUse),
];

/// Adds an edge from every token of each candidate in a site's possible set
/// to every token of the site, for every identifier reference and variable
/// declaration inside an analysed method body.
pub fn link_dataflow_edges(
    unit: &SyntaxTree,
    analysis: &AnalysisResults,
    graph: &mut FeatureGraph,
    config: &LinkerConfig,
) -> LinkStats {
    let Some(root) = unit.root else {
        debug!("compilation unit has no root; skipping dataflow linking");
        return LinkStats::default();
    };
    let mut linker = Linker::new(graph, config);
    let mut seen = vec![false; unit.len()];
    let mut stack = vec![(root, ScanContext::default())];
    while let Some((id, context)) = stack.pop() {
        match seen.get_mut(id.0) {
            Some(flag) if !*flag => *flag = true,
            _ => continue,
        }
        let Some(kind) = unit.kind(id) else { continue };
        let context = match kind {
            TreeKind::Class { .. } => context.with_class(id),
            TreeKind::Method { .. } => context.with_method(id),
            TreeKind::Identifier { .. } | TreeKind::Variable { .. } => {
                apply(&mut linker, analysis, id, context);
                context
            }
            _ => context,
        };
        for child in unit.children(id).into_iter().rev() {
            stack.push((child, context));
        }
    }
    debug!(
        added = linker.stats.edges_added,
        sites = linker.stats.sites_visited,
        "dataflow linking finished"
    );
    linker.stats
}

fn apply(linker: &mut Linker<'_>, analysis: &AnalysisResults, site: TreeId, context: ScanContext) {
    linker.stats.sites_visited += 1;
    let Some((class, method)) = context.enclosing() else {
        linker.stats.skipped_outside_method += 1;
        return;
    };
    let Some(outputs) = analysis.get(class, method) else {
        trace!(%class, %method, "method was not analysed");
        linker.stats.skipped_unanalyzed += 1;
        return;
    };
    for (fact, edge) in FACTS {
        apply_fact(linker, outputs, site, fact, edge);
    }
}

fn apply_fact(
    linker: &mut Linker<'_>,
    outputs: &DataflowOutputs,
    site: TreeId,
    fact: FactKind,
    edge: EdgeType,
) {
    let Some(possibles) = outputs.possibles(fact, site) else {
        linker.stats.skipped_no_fact += 1;
        return;
    };
    if possibles.is_empty() {
        return;
    }
    let Some(site_node) = linker.graph.feature_node(site) else {
        trace!(%site, "site has no feature node");
        linker.stats.missing_feature_node += 1;
        return;
    };
    for candidate in possibles.nodes() {
        let Some(prior) = linker.graph.feature_node(candidate) else {
            trace!(%candidate, "candidate has no feature node");
            linker.stats.missing_feature_node += 1;
            continue;
        };
        linker.tokens(prior, site_node, edge);
    }
}
