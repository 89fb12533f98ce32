//! Tree and skeleton builders for tests, benches and fuzzing.
//!
//! The skeleton built here is deliberately plain: one syntax node per tree
//! element, `AST_CHILD` edges, and a single token for each named element or
//! literal. Production skeletons come from the driver.

use crate::ast::{SyntaxTree, TreeId, TreeKind};
use crate::graph::{EdgeType, FeatureGraph, NodeType};

#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: SyntaxTree,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: TreeKind) -> TreeId {
        self.tree.push(kind)
    }

    pub fn ident(&mut self, name: &str) -> TreeId {
        self.push(TreeKind::Identifier { name: name.into() })
    }

    pub fn literal(&mut self, value: &str) -> TreeId {
        self.push(TreeKind::Literal {
            value: value.into(),
        })
    }

    pub fn var(&mut self, name: &str, initializer: Option<TreeId>) -> TreeId {
        self.push(TreeKind::Variable {
            name: name.into(),
            initializer,
        })
    }

    pub fn binary(&mut self, operator: &str, left: TreeId, right: TreeId) -> TreeId {
        self.push(TreeKind::Binary {
            operator: operator.into(),
            left,
            right,
        })
    }

    pub fn assign(&mut self, target: TreeId, value: TreeId) -> TreeId {
        let assignment = self.push(TreeKind::Assignment { target, value });
        self.push(TreeKind::ExpressionStatement {
            expression: assignment,
        })
    }

    pub fn ret(&mut self, expression: Option<TreeId>) -> TreeId {
        self.push(TreeKind::Return { expression })
    }

    pub fn block(&mut self, statements: Vec<TreeId>) -> TreeId {
        self.push(TreeKind::Block { statements })
    }

    pub fn method(&mut self, name: &str, params: Vec<TreeId>, body: Option<TreeId>) -> TreeId {
        self.push(TreeKind::Method {
            name: name.into(),
            params,
            body,
        })
    }

    pub fn class(&mut self, name: &str, members: Vec<TreeId>) -> TreeId {
        self.push(TreeKind::Class {
            name: name.into(),
            members,
        })
    }

    pub fn unit(mut self, types: Vec<TreeId>) -> SyntaxTree {
        self.tree.push(TreeKind::CompilationUnit { types });
        self.tree
    }

    /// Returns the tree as is, without a compilation-unit root.
    pub fn finish(self) -> SyntaxTree {
        self.tree
    }
}

/// Builds a skeleton graph for `tree`.
pub fn skeleton(tree: &SyntaxTree) -> FeatureGraph {
    let mut graph = FeatureGraph::new();
    for element in &tree.nodes {
        let label = tree.label(element.id).unwrap_or("UNKNOWN");
        graph.create_tree_node(element.id, NodeType::AstElement, label);
    }
    for element in &tree.nodes {
        let Some(parent) = graph.feature_node(element.id) else {
            continue;
        };
        for child in tree.children(element.id) {
            if let Some(child) = graph.feature_node(child) {
                graph.put_edge_value(parent, child, EdgeType::AstChild);
            }
        }
        let token = match &element.kind {
            TreeKind::Identifier { name }
            | TreeKind::Variable { name, .. }
            | TreeKind::Method { name, .. }
            | TreeKind::Class { name, .. } => {
                Some(graph.create_node(NodeType::IdentifierToken, name.as_str()))
            }
            TreeKind::Literal { value } => Some(graph.create_node(NodeType::Token, value.as_str())),
            _ => None,
        };
        if let Some(token) = token {
            graph.put_edge_value(parent, token, EdgeType::AssociatedToken);
        }
    }
    graph
}

/// Token node of a tree element in a skeleton built by [`skeleton`].
pub fn token_of(graph: &FeatureGraph, tree: TreeId) -> Option<crate::graph::NodeId> {
    graph
        .feature_node(tree)
        .and_then(|n| graph.token_successors(n).into_iter().next())
}
