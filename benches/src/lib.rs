//! Synthetic compilation units for benchmarking the linkers.

use ir::testing::{skeleton, TreeBuilder};
use ir::{AnalysisResults, DataflowOutputs, FeatureGraph, SyntaxTree, TreeId};

pub struct Unit {
    pub tree: SyntaxTree,
    pub graph: FeatureGraph,
    pub analysis: AnalysisResults,
}

/// One class with `methods` methods. Each method declares `x`, reassigns it
/// `statements` times from its previous value and returns it, with a
/// last-write fact for every read.
pub fn synthetic_unit(methods: usize, statements: usize) -> Unit {
    let mut b = TreeBuilder::new();
    let mut facts: Vec<(usize, DataflowOutputs)> = Vec::new();
    let mut method_ids = Vec::new();
    for m in 0..methods {
        let mut outputs = DataflowOutputs::default();
        let decl = b.var("x", None);
        let mut last_write: TreeId = decl;
        let mut stmts = vec![decl];
        for _ in 0..statements {
            let read = b.ident("x");
            outputs
                .last_writes
                .insert(read, [last_write].into_iter().collect());
            let one = b.literal("1");
            let sum = b.binary("+", read, one);
            let target = b.ident("x");
            stmts.push(b.assign(target, sum));
            last_write = target;
        }
        let ret_read = b.ident("x");
        outputs
            .last_writes
            .insert(ret_read, [last_write].into_iter().collect());
        stmts.push(b.ret(Some(ret_read)));
        let body = b.block(stmts);
        method_ids.push(b.method(&format!("m{m}"), vec![], Some(body)));
        facts.push((m, outputs));
    }
    let class = b.class("Bench", method_ids.clone());
    let tree = b.unit(vec![class]);
    let mut analysis = AnalysisResults::new();
    for (m, outputs) in facts {
        analysis.insert(class, method_ids[m], outputs);
    }
    let graph = skeleton(&tree);
    Unit {
        tree,
        graph,
        analysis,
    }
}
