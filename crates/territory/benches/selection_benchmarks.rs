use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use terragate_territory::{SelectionEngine, TerritoryKind, TerritoryNode, TerritoryTree};

/// Build a full-depth tree with the given branching factor per level.
fn synthetic_tree(branching: usize) -> TerritoryTree {
    fn build(prefix: String, depth: usize, branching: usize) -> TerritoryNode {
        let kind = TerritoryKind::from_depth(depth).expect("depth within hierarchy");
        let children = if kind.is_leaf_level() {
            Vec::new()
        } else {
            (0..branching)
                .map(|i| build(format!("{prefix}-{i}"), depth + 1, branching))
                .collect()
        };
        TerritoryNode::new(prefix.clone(), format!("Territory {prefix}"), kind)
            .with_children(children)
    }

    TerritoryTree::from_roots(
        (0..branching)
            .map(|i| build(format!("t{i}"), 0, branching))
            .collect(),
    )
    .expect("synthetic tree is well-formed")
}

fn bench_island_cascade_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("island_cascade_toggle");

    for branching in [2usize, 3, 4] {
        let tree = synthetic_tree(branching);
        let island = tree.roots()[0].clone();
        let cohort = tree.descendants(&island).len() + 1;

        group.throughput(Throughput::Elements(cohort as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(branching),
            &branching,
            |b, _| {
                b.iter(|| {
                    let mut engine = SelectionEngine::new(&tree);
                    engine.toggle(black_box(&island));
                    engine.toggle(black_box(&island));
                    black_box(engine.selection().len())
                });
            },
        );
    }

    group.finish();
}

fn bench_descendants_walk(c: &mut Criterion) {
    let tree = synthetic_tree(4);
    let island = tree.roots()[0].clone();

    c.bench_function("descendants_walk_b4", |b| {
        b.iter(|| black_box(tree.descendants(black_box(&island))).len());
    });
}

fn bench_disabled_lookup(c: &mut Criterion) {
    let tree = synthetic_tree(3);
    let island = tree.roots()[0].clone();
    let mut engine = SelectionEngine::new(&tree);
    engine.toggle(&island);
    let leaf = tree.descendants(&island).pop().expect("tree has leaves");

    c.bench_function("is_disabled_lookup", |b| {
        b.iter(|| black_box(engine.is_disabled(black_box(&leaf))));
    });
}

criterion_group!(
    benches,
    bench_island_cascade_toggle,
    bench_descendants_walk,
    bench_disabled_lookup
);
criterion_main!(benches);
