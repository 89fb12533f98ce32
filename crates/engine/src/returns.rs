//! `RETURNS_TO` edges from identifiers in return expressions to the
//! enclosing method's node.

use crate::config::{LinkerConfig, ReturnMode};
use crate::link::Linker;
use crate::stats::LinkStats;
use ir::{EdgeType, FeatureGraph, SyntaxTree, TreeId, TreeKind};
use tracing::{debug, trace};

pub fn link_returns_to(
    unit: &SyntaxTree,
    graph: &mut FeatureGraph,
    config: &LinkerConfig,
) -> LinkStats {
    let Some(root) = unit.root else {
        debug!("compilation unit has no root; skipping return-flow linking");
        return LinkStats::default();
    };
    let mut linker = Linker::new(graph, config);
    for id in unit.preorder(root) {
        if let Some(TreeKind::Method {
            body: Some(body), ..
        }) = unit.kind(id)
        {
            link_method(&mut linker, unit, id, *body, config.return_mode);
        }
    }
    debug!(
        added = linker.stats.edges_added,
        methods = linker.stats.methods_linked,
        "return-flow linking finished"
    );
    linker.stats
}

fn link_method(
    linker: &mut Linker<'_>,
    unit: &SyntaxTree,
    method: TreeId,
    body: TreeId,
    mode: ReturnMode,
) {
    let expressions = return_expressions(linker, unit, body, mode);
    let selected: &[TreeId] = match mode {
        ReturnMode::All => &expressions,
        ReturnMode::Last => expressions.last().map(std::slice::from_ref).unwrap_or(&[]),
    };
    let identifiers: Vec<TreeId> = selected
        .iter()
        .flat_map(|expr| identifiers_in(unit, *expr))
        .collect();
    if identifiers.is_empty() {
        return;
    }
    let Some(dest) = linker.graph.feature_node(method) else {
        trace!(%method, "method has no feature node");
        linker.stats.missing_feature_node += identifiers.len();
        return;
    };
    linker.stats.methods_linked += 1;
    for ident in identifiers {
        linker.stats.sites_visited += 1;
        let Some(source) = linker.graph.feature_node(ident) else {
            trace!(%ident, "identifier has no feature node");
            linker.stats.missing_feature_node += 1;
            continue;
        };
        linker.tokens_to_node(source, dest, EdgeType::ReturnsTo);
    }
}

/// Expressions of the return statements found in `body`, in source order.
///
/// In `All` mode nested classes and lambdas own their returns and are not
/// entered. `Last` mode scans the whole body, nested declarations included,
/// so the textually last return wins wherever it sits.
fn return_expressions(
    linker: &mut Linker<'_>,
    unit: &SyntaxTree,
    body: TreeId,
    mode: ReturnMode,
) -> Vec<TreeId> {
    let mut expressions = Vec::new();
    let reached = unit.walk(body, |id, kind| match kind {
        TreeKind::Return { .. } => false,
        TreeKind::Class { .. } | TreeKind::Lambda { .. } => {
            mode == ReturnMode::Last || id == body
        }
        _ => true,
    });
    for id in reached {
        if let Some(TreeKind::Return { expression }) = unit.kind(id) {
            linker.stats.returns_seen += 1;
            match expression {
                Some(expr) => expressions.push(*expr),
                None => linker.stats.bare_returns += 1,
            }
        }
    }
    expressions
}

fn identifiers_in(unit: &SyntaxTree, expression: TreeId) -> Vec<TreeId> {
    unit.preorder(expression)
        .into_iter()
        .filter(|id| matches!(unit.kind(*id), Some(TreeKind::Identifier { .. })))
        .collect()
}
