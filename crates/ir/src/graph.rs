//! Feature graph: syntax and token nodes plus typed relation edges.
//!
//! Node ids are allocated by the graph itself and double as arena indices, so
//! two graphs never share an id space and ids only grow while a unit is being
//! processed.

use crate::ast::TreeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Token,
    IdentifierToken,
    AstElement,
    FakeAst,
    Comment,
}

impl NodeType {
    pub fn is_token(self) -> bool {
        matches!(self, NodeType::Token | NodeType::IdentifierToken)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeType {
    /// Parent syntax node to child syntax node.
    AstChild,
    /// Syntax node to the token(s) representing it.
    AssociatedToken,
    /// Lexical successor between tokens.
    NextToken,
    /// Most recent write of a variable to a later read/assignment site.
    LastWrite,
    /// Most recent use of a value to the site that later consumes it.
    LastUse,
    /// Identifier token whose value may flow into a method's return value.
    ReturnsTo,
}

impl EdgeType {
    /// Edge kinds written by the skeleton pass rather than by the linkers.
    pub fn is_skeleton(self) -> bool {
        matches!(
            self,
            EdgeType::AstChild | EdgeType::AssociatedToken | EdgeType::NextToken
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeType::AstChild => "AST_CHILD",
            EdgeType::AssociatedToken => "ASSOCIATED_TOKEN",
            EdgeType::NextToken => "NEXT_TOKEN",
            EdgeType::LastWrite => "LAST_WRITE",
            EdgeType::LastUse => "LAST_USE",
            EdgeType::ReturnsTo => "RETURNS_TO",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which successor kinds a query is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeFilter {
    Exactly(NodeType),
    /// `Token` and `IdentifierToken`.
    AnyToken,
}

impl NodeFilter {
    fn accepts(self, node_type: NodeType) -> bool {
        match self {
            NodeFilter::Exactly(t) => t == node_type,
            NodeFilter::AnyToken => node_type.is_token(),
        }
    }
}

impl From<NodeType> for NodeFilter {
    fn from(t: NodeType) -> Self {
        NodeFilter::Exactly(t)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureNode {
    pub id: NodeId,
    pub node_type: NodeType,
    /// Token text, or the syntactic category for syntax nodes.
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureGraph {
    nodes: Vec<FeatureNode>,
    /// Registered tree elements and their directly associated node.
    #[serde(default)]
    tree_nodes: HashMap<TreeId, NodeId>,
    /// Outgoing adjacency. A set per source keeps upserts idempotent.
    #[serde(default)]
    edges: BTreeMap<NodeId, BTreeSet<(NodeId, EdgeType)>>,
}

impl FeatureGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node with the next free id.
    pub fn create_node(&mut self, node_type: NodeType, contents: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(FeatureNode {
            id,
            node_type,
            contents: contents.into(),
        });
        id
    }

    /// Creates the node associated with a tree element. Registering the same
    /// element again returns the node created the first time.
    pub fn create_tree_node(
        &mut self,
        tree: TreeId,
        node_type: NodeType,
        contents: impl Into<String>,
    ) -> NodeId {
        if let Some(existing) = self.tree_nodes.get(&tree) {
            return *existing;
        }
        let id = self.create_node(node_type, contents);
        self.tree_nodes.insert(tree, id);
        id
    }

    pub fn feature_node(&self, tree: TreeId) -> Option<NodeId> {
        self.tree_nodes.get(&tree).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&FeatureNode> {
        usize::try_from(id.0).ok().and_then(|i| self.nodes.get(i))
    }

    pub fn nodes(&self) -> &[FeatureNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts `source -> target` with `kind`. Returns `false` when the edge
    /// was already present or an endpoint is unknown.
    pub fn put_edge_value(&mut self, source: NodeId, target: NodeId, kind: EdgeType) -> bool {
        if self.node(source).is_none() || self.node(target).is_none() {
            return false;
        }
        self.edges.entry(source).or_default().insert((target, kind))
    }

    pub fn has_edge(&self, source: NodeId, target: NodeId, kind: EdgeType) -> bool {
        self.edges
            .get(&source)
            .is_some_and(|out| out.contains(&(target, kind)))
    }

    /// Successors of `node` whose node type passes `filter`, over any edge
    /// kind.
    pub fn successors(&self, node: NodeId, filter: impl Into<NodeFilter>) -> BTreeSet<NodeId> {
        let filter = filter.into();
        self.edges
            .get(&node)
            .into_iter()
            .flatten()
            .map(|(target, _)| *target)
            .filter(|t| self.node(*t).is_some_and(|n| filter.accepts(n.node_type)))
            .collect()
    }

    /// Token-level representatives of `node`: token successors reached over
    /// skeleton edges. Semantic edges added by the linkers are not followed,
    /// so resolution gives the same answer before and after linking.
    pub fn token_successors(&self, node: NodeId) -> BTreeSet<NodeId> {
        self.edges
            .get(&node)
            .into_iter()
            .flatten()
            .filter(|(_, kind)| kind.is_skeleton())
            .map(|(target, _)| *target)
            .filter(|t| self.node(*t).is_some_and(|n| n.node_type.is_token()))
            .collect()
    }

    /// Sources of incoming `kind` edges into `node`.
    pub fn predecessors(&self, node: NodeId, kind: EdgeType) -> BTreeSet<NodeId> {
        self.edges
            .iter()
            .filter(|(_, out)| out.contains(&(node, kind)))
            .map(|(source, _)| *source)
            .collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().flat_map(|(source, out)| {
            out.iter().map(move |(target, kind)| Edge {
                source: *source,
                target: *target,
                kind: *kind,
            })
        })
    }

    pub fn edges_of_type(&self, kind: EdgeType) -> Vec<Edge> {
        self.edges().filter(|e| e.kind == kind).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn edge_counts(&self) -> BTreeMap<EdgeType, usize> {
        let mut counts = BTreeMap::new();
        for edge in self.edges() {
            *counts.entry(edge.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Checks invariants that a deserialised graph may violate: node ids
    /// must match their slot, and associations and edges must reference
    /// existing nodes.
    pub fn validate(&self) -> Result<(), String> {
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.id.0 != idx as u64 {
                return Err(format!("node at slot {idx} has id {}", node.id));
            }
        }
        for (tree, node) in &self.tree_nodes {
            if self.node(*node).is_none() {
                return Err(format!("{tree} is associated with missing node {node}"));
            }
        }
        for edge in self.edges() {
            if self.node(edge.source).is_none() || self.node(edge.target).is_none() {
                return Err(format!(
                    "{} edge {} -> {} references a missing node",
                    edge.kind, edge.source, edge.target
                ));
            }
        }
        Ok(())
    }
}
