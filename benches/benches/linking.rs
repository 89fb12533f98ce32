use benches::synthetic_unit;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine::{link_dataflow_edges, link_returns_to, link_unit, LinkerConfig};

fn bench_linkers(c: &mut Criterion) {
    let config = LinkerConfig::default();
    for (name, methods, statements) in [("small", 10, 10), ("wide", 500, 10), ("deep", 5, 2_000)] {
        let unit = synthetic_unit(methods, statements);
        c.bench_function(&format!("dataflow_{name}"), |b| {
            b.iter_batched(
                || unit.graph.clone(),
                |mut graph| {
                    link_dataflow_edges(
                        black_box(&unit.tree),
                        black_box(&unit.analysis),
                        &mut graph,
                        &config,
                    )
                },
                BatchSize::LargeInput,
            )
        });
        c.bench_function(&format!("returns_to_{name}"), |b| {
            b.iter_batched(
                || unit.graph.clone(),
                |mut graph| link_returns_to(black_box(&unit.tree), &mut graph, &config),
                BatchSize::LargeInput,
            )
        });
        c.bench_function(&format!("link_unit_{name}"), |b| {
            b.iter_batched(
                || unit.graph.clone(),
                |mut graph| link_unit(&unit.tree, &unit.analysis, &mut graph, &config),
                BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(benches, bench_linkers);
criterion_main!(benches);
