//! Shared types for the feature-graph linkers.
//!
//! The syntax tree ([`ast`]) is what the parser hands over, the feature
//! graph ([`graph`]) is what the linkers mutate, and the dataflow facts
//! ([`dfg`]) are what the analysis supplies per method. All three are
//! serialisable so a driver can ship a whole compilation unit as one
//! document.

pub mod ast;
pub mod dfg;
pub mod graph;
#[cfg(feature = "testing")]
pub mod testing;

pub use ast::{SyntaxTree, Tree, TreeId, TreeKind};
pub use dfg::{AnalysisResults, DataflowOutputs, FactKind, PossibleTreeSet};
pub use graph::{Edge, EdgeType, FeatureGraph, FeatureNode, NodeFilter, NodeId, NodeType};

#[cfg(test)]
mod tests;
