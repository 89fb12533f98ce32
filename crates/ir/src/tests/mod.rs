use super::*;
use serde_json::{self, Value as JsonValue};

fn sample_tree() -> SyntaxTree {
    let mut tree = SyntaxTree::new();
    let a = tree.push(TreeKind::Identifier { name: "a".into() });
    let b = tree.push(TreeKind::Identifier { name: "b".into() });
    let sum = tree.push(TreeKind::Binary {
        operator: "+".into(),
        left: a,
        right: b,
    });
    let ret = tree.push(TreeKind::Return {
        expression: Some(sum),
    });
    let body = tree.push(TreeKind::Block {
        statements: vec![ret],
    });
    let method = tree.push(TreeKind::Method {
        name: "f".into(),
        params: vec![],
        body: Some(body),
    });
    let class = tree.push(TreeKind::Class {
        name: "A".into(),
        members: vec![method],
    });
    tree.push(TreeKind::CompilationUnit { types: vec![class] });
    tree
}

#[test]
fn push_assigns_arena_ids_and_tracks_root() {
    let tree = sample_tree();
    assert_eq!(tree.len(), 8);
    assert_eq!(tree.root, Some(TreeId(7)));
    for (idx, element) in tree.nodes.iter().enumerate() {
        assert_eq!(element.id, TreeId(idx));
    }
}

#[test]
fn children_follow_source_order() {
    let tree = sample_tree();
    assert_eq!(tree.children(TreeId(2)), vec![TreeId(0), TreeId(1)]);
    assert_eq!(tree.children(TreeId(3)), vec![TreeId(2)]);
    assert!(tree.children(TreeId(0)).is_empty());
    assert!(tree.children(TreeId(42)).is_empty());
}

#[test]
fn preorder_visits_parents_before_children() {
    let tree = sample_tree();
    let order = tree.preorder(TreeId(7));
    let ids: Vec<usize> = order.iter().map(|t| t.0).collect();
    assert_eq!(ids, vec![7, 6, 5, 4, 3, 2, 0, 1]);
}

#[test]
fn preorder_handles_deep_nesting() {
    let mut tree = SyntaxTree::new();
    let mut expr = tree.push(TreeKind::Identifier { name: "x".into() });
    for _ in 0..100_000 {
        expr = tree.push(TreeKind::Unary {
            operator: "-".into(),
            operand: expr,
        });
    }
    assert_eq!(tree.preorder(expr).len(), 100_001);
}

#[test]
fn tree_validation_rejects_dangling_children() {
    let mut tree = SyntaxTree::new();
    tree.push(TreeKind::Return {
        expression: Some(TreeId(9)),
    });
    assert!(tree.validate().is_err());
    assert!(sample_tree().validate().is_ok());
}

#[test]
fn tree_json_uses_kind_tag() {
    let tree = sample_tree();
    let json = serde_json::to_string(&tree).unwrap();
    let v: JsonValue = serde_json::from_str(&json).unwrap();
    assert_eq!(v["nodes"][0]["kind"], "Identifier");
    assert_eq!(v["nodes"][0]["name"], "a");
    assert_eq!(v["nodes"][0]["id"], 0);

    let back: SyntaxTree = serde_json::from_str(&json).unwrap();
    assert_eq!(back.nodes, tree.nodes);
    assert_eq!(back.root, tree.root);
}

#[test]
fn labels_name_syntactic_categories() {
    let tree = sample_tree();
    assert_eq!(tree.label(TreeId(5)), Some("METHOD"));
    assert_eq!(tree.label(TreeId(3)), Some("RETURN"));
    assert_eq!(tree.label(TreeId(42)), None);
}

#[test]
fn node_ids_are_per_graph() {
    let mut g1 = FeatureGraph::new();
    let mut g2 = FeatureGraph::new();
    let a = g1.create_node(NodeType::Token, "a");
    let b = g1.create_node(NodeType::Token, "b");
    let c = g2.create_node(NodeType::Token, "c");
    assert_eq!(a, NodeId(0));
    assert_eq!(b, NodeId(1));
    assert_eq!(c, NodeId(0));
}

#[test]
fn identical_nodes_are_distinct() {
    let mut g = FeatureGraph::new();
    let a = g.create_node(NodeType::Token, "x");
    let b = g.create_node(NodeType::Token, "x");
    assert_ne!(a, b);
    assert_eq!(g.node_count(), 2);
}

#[test]
fn tree_registration_is_single_valued() {
    let mut g = FeatureGraph::new();
    let first = g.create_tree_node(TreeId(3), NodeType::AstElement, "IDENTIFIER");
    let again = g.create_tree_node(TreeId(3), NodeType::AstElement, "IDENTIFIER");
    assert_eq!(first, again);
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.feature_node(TreeId(3)), Some(first));
    assert_eq!(g.feature_node(TreeId(4)), None);
}

#[test]
fn edge_upsert_is_idempotent_per_kind() {
    let mut g = FeatureGraph::new();
    let a = g.create_node(NodeType::Token, "a");
    let b = g.create_node(NodeType::Token, "b");
    assert!(g.put_edge_value(a, b, EdgeType::LastWrite));
    assert!(!g.put_edge_value(a, b, EdgeType::LastWrite));
    assert!(g.put_edge_value(a, b, EdgeType::LastUse));
    assert_eq!(g.edge_count(), 2);
    assert!(g.has_edge(a, b, EdgeType::LastUse));
    assert!(!g.has_edge(b, a, EdgeType::LastUse));
}

#[test]
fn edges_to_unknown_nodes_are_refused() {
    let mut g = FeatureGraph::new();
    let a = g.create_node(NodeType::Token, "a");
    assert!(!g.put_edge_value(a, NodeId(99), EdgeType::LastUse));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn successors_filter_by_node_type() {
    let mut g = FeatureGraph::new();
    let syntax = g.create_tree_node(TreeId(0), NodeType::AstElement, "VARIABLE");
    let child = g.create_tree_node(TreeId(1), NodeType::AstElement, "LITERAL");
    let tok = g.create_node(NodeType::Token, "=");
    let ident = g.create_node(NodeType::IdentifierToken, "x");
    g.put_edge_value(syntax, child, EdgeType::AstChild);
    g.put_edge_value(syntax, tok, EdgeType::AssociatedToken);
    g.put_edge_value(syntax, ident, EdgeType::AssociatedToken);

    let tokens: Vec<NodeId> = g.successors(syntax, NodeType::Token).into_iter().collect();
    assert_eq!(tokens, vec![tok]);
    assert_eq!(g.token_successors(syntax).len(), 2);
    assert_eq!(
        g.successors(syntax, NodeType::AstElement).into_iter().collect::<Vec<_>>(),
        vec![child]
    );
}

#[test]
fn predecessors_and_counts() {
    let mut g = FeatureGraph::new();
    let a = g.create_node(NodeType::Token, "a");
    let b = g.create_node(NodeType::Token, "b");
    let m = g.create_node(NodeType::AstElement, "METHOD");
    g.put_edge_value(a, m, EdgeType::ReturnsTo);
    g.put_edge_value(b, m, EdgeType::ReturnsTo);
    g.put_edge_value(a, b, EdgeType::NextToken);
    assert_eq!(g.predecessors(m, EdgeType::ReturnsTo).len(), 2);
    assert!(g.predecessors(m, EdgeType::LastUse).is_empty());
    let counts = g.edge_counts();
    assert_eq!(counts.get(&EdgeType::ReturnsTo), Some(&2));
    assert_eq!(counts.get(&EdgeType::NextToken), Some(&1));
    assert_eq!(g.edges_of_type(EdgeType::ReturnsTo).len(), 2);
}

#[test]
fn graph_json_roundtrip_keeps_edges_and_associations() {
    let mut g = FeatureGraph::new();
    let syntax = g.create_tree_node(TreeId(5), NodeType::AstElement, "IDENTIFIER");
    let tok = g.create_node(NodeType::IdentifierToken, "x");
    g.put_edge_value(syntax, tok, EdgeType::AssociatedToken);

    let json = serde_json::to_string(&g).unwrap();
    let v: JsonValue = serde_json::from_str(&json).unwrap();
    assert_eq!(v["nodes"][1]["node_type"], "IDENTIFIER_TOKEN");

    let back: FeatureGraph = serde_json::from_str(&json).unwrap();
    assert!(back.validate().is_ok());
    assert_eq!(back.feature_node(TreeId(5)), Some(syntax));
    assert!(back.has_edge(syntax, tok, EdgeType::AssociatedToken));
}

#[test]
fn graph_validation_rejects_dangling_edges() {
    let json = r#"{"nodes":[{"id":0,"node_type":"TOKEN","contents":"a"}],"edges":{"0":[[7,"LAST_USE"]]}}"#;
    let g: FeatureGraph = serde_json::from_str(json).unwrap();
    assert!(g.validate().is_err());
}

#[test]
fn graph_validation_rejects_sparse_ids() {
    let json = r#"{"nodes":[{"id":3,"node_type":"TOKEN","contents":"a"}]}"#;
    let g: FeatureGraph = serde_json::from_str(json).unwrap();
    assert!(g.validate().is_err());
}

#[test]
fn analysis_results_lookup() {
    let mut results = AnalysisResults::new();
    let mut outputs = DataflowOutputs::default();
    outputs
        .last_writes
        .insert(TreeId(4), [TreeId(1), TreeId(2)].into_iter().collect());
    results.insert(TreeId(10), TreeId(11), outputs);

    assert_eq!(results.len(), 1);
    let found = results.get(TreeId(10), TreeId(11)).expect("outputs");
    let possibles = found.possibles(FactKind::LastWrite, TreeId(4)).unwrap();
    assert_eq!(possibles.len(), 2);
    assert!(found.possibles(FactKind::LastUse, TreeId(4)).is_none());
    assert!(results.get(TreeId(11), TreeId(10)).is_none());
    assert!(results.referenced_trees().contains(&TreeId(2)));
}

#[test]
fn analysis_results_json_keys_are_tree_ids() {
    let json = r#"{"3":{"4":{"last_writes":{"7":[5,6]},"last_uses":{"7":[]}}}}"#;
    let results: AnalysisResults = serde_json::from_str(json).unwrap();
    let outputs = results.get(TreeId(3), TreeId(4)).unwrap();
    assert_eq!(outputs.last_writes[&TreeId(7)].len(), 2);
    assert!(outputs.last_uses[&TreeId(7)].is_empty());
}

#[test]
fn token_resolution_ignores_semantic_edges() {
    let mut g = FeatureGraph::new();
    let site = g.create_node(NodeType::IdentifierToken, "x");
    let other = g.create_node(NodeType::IdentifierToken, "y");
    g.put_edge_value(site, other, EdgeType::LastWrite);
    assert!(g.token_successors(site).is_empty());
    assert_eq!(g.successors(site, NodeFilter::AnyToken).len(), 1);
}
