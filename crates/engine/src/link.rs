//! Token-level edge creation shared by the linkers.

use crate::config::LinkerConfig;
use crate::stats::LinkStats;
use ir::{EdgeType, FeatureGraph, NodeId};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// What a single link request did to the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOutcome {
    pub source_tokens: usize,
    pub dest_tokens: usize,
    pub added: usize,
    pub existing: usize,
}

impl LinkOutcome {
    /// Resolution did not give exactly one token on each side.
    pub fn is_ambiguous(&self) -> bool {
        self.source_tokens != 1 || self.dest_tokens != 1
    }
}

/// Links every token of `source` to every token of `dest` with `kind`.
///
/// Either side resolving to no token creates nothing. Existing edges are
/// left as they are.
pub fn link_tokens(
    graph: &mut FeatureGraph,
    source: NodeId,
    dest: NodeId,
    kind: EdgeType,
) -> LinkOutcome {
    let sources = graph.token_successors(source);
    let dests = graph.token_successors(dest);
    put_product(graph, &sources, &dests, kind)
}

/// Links every token of `source` to `dest` itself.
pub fn link_tokens_to_node(
    graph: &mut FeatureGraph,
    source: NodeId,
    dest: NodeId,
    kind: EdgeType,
) -> LinkOutcome {
    let sources = graph.token_successors(source);
    let dests = BTreeSet::from([dest]);
    put_product(graph, &sources, &dests, kind)
}

fn put_product(
    graph: &mut FeatureGraph,
    sources: &BTreeSet<NodeId>,
    dests: &BTreeSet<NodeId>,
    kind: EdgeType,
) -> LinkOutcome {
    let mut outcome = LinkOutcome {
        source_tokens: sources.len(),
        dest_tokens: dests.len(),
        ..LinkOutcome::default()
    };
    for s in sources {
        for d in dests {
            if graph.put_edge_value(*s, *d, kind) {
                outcome.added += 1;
            } else if graph.has_edge(*s, *d, kind) {
                outcome.existing += 1;
            }
        }
    }
    outcome
}

/// Graph handle used by a single pass: links, counts and reports.
pub(crate) struct Linker<'a> {
    pub(crate) graph: &'a mut FeatureGraph,
    config: &'a LinkerConfig,
    pub(crate) stats: LinkStats,
}

impl<'a> Linker<'a> {
    pub(crate) fn new(graph: &'a mut FeatureGraph, config: &'a LinkerConfig) -> Self {
        Self {
            graph,
            config,
            stats: LinkStats::default(),
        }
    }

    pub(crate) fn tokens(&mut self, source: NodeId, dest: NodeId, kind: EdgeType) {
        let outcome = link_tokens(self.graph, source, dest, kind);
        self.record(source, dest, kind, outcome);
    }

    pub(crate) fn tokens_to_node(&mut self, source: NodeId, dest: NodeId, kind: EdgeType) {
        let outcome = link_tokens_to_node(self.graph, source, dest, kind);
        self.record(source, dest, kind, outcome);
    }

    fn record(&mut self, source: NodeId, dest: NodeId, kind: EdgeType, outcome: LinkOutcome) {
        self.stats.edges_added += outcome.added;
        self.stats.edges_existing += outcome.existing;
        if !outcome.is_ambiguous() {
            return;
        }
        self.stats.ambiguous_tokens += 1;
        if self.config.warn_ambiguous {
            warn!(
                %kind, %source, %dest,
                source_tokens = outcome.source_tokens,
                dest_tokens = outcome.dest_tokens,
                "ambiguous token resolution"
            );
        } else {
            debug!(
                %kind, %source, %dest,
                source_tokens = outcome.source_tokens,
                dest_tokens = outcome.dest_tokens,
                "ambiguous token resolution"
            );
        }
    }
}
