use serde::Serialize;
use std::ops::AddAssign;

/// Counters gathered while linking one or more compilation units.
///
/// Every skip condition the linkers tolerate is counted here, so a driver
/// can tell a sparse graph from a skeleton or analysis gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    /// Identifier and variable sites (dataflow) or collected identifiers
    /// (return flow) that were considered.
    pub sites_visited: usize,
    pub edges_added: usize,
    /// Edges that were requested but already present.
    pub edges_existing: usize,
    pub skipped_outside_method: usize,
    pub skipped_unanalyzed: usize,
    pub skipped_no_fact: usize,
    /// Tree elements with no associated feature node.
    pub missing_feature_node: usize,
    /// Resolutions that produced zero or several tokens.
    pub ambiguous_tokens: usize,
    pub methods_linked: usize,
    pub returns_seen: usize,
    pub bare_returns: usize,
}

impl AddAssign for LinkStats {
    fn add_assign(&mut self, other: Self) {
        self.sites_visited += other.sites_visited;
        self.edges_added += other.edges_added;
        self.edges_existing += other.edges_existing;
        self.skipped_outside_method += other.skipped_outside_method;
        self.skipped_unanalyzed += other.skipped_unanalyzed;
        self.skipped_no_fact += other.skipped_no_fact;
        self.missing_feature_node += other.missing_feature_node;
        self.ambiguous_tokens += other.ambiguous_tokens;
        self.methods_linked += other.methods_linked;
        self.returns_seen += other.returns_seen;
        self.bare_returns += other.bare_returns;
    }
}
