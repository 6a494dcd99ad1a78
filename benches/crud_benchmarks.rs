use avl_tree::AvlTree;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Deterministic LCG so every run sees the same sequence.
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("AvlTree", N), |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for &k in keys {
                tree.insert(k);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "insert_ordered", &ordered_keys(N));
}

fn bench_insert_reverse(c: &mut Criterion) {
    bench_insert(c, "insert_reverse", &reverse_ordered_keys(N));
}

fn bench_insert_random(c: &mut Criterion) {
    bench_insert(c, "insert_random", &random_keys(N));
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_find_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: AvlTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("find_random");

    group.bench_function(BenchmarkId::new("AvlTree", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(tree.find(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(set.get(k));
            }
        });
    });

    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree: AvlTree<i64> = keys.iter().copied().collect();
    let set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("iter");

    group.bench_function(BenchmarkId::new("AvlTree", N), |b| {
        b.iter(|| tree.iter().copied().sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| set.iter().copied().sum::<i64>());
    });

    group.finish();
}

// ─── Remove ─────────────────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("AvlTree", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<AvlTree<i64>>(),
            |mut tree| {
                for k in &keys {
                    tree.remove(k);
                }
                tree
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                for k in &keys {
                    set.remove(k);
                }
                set
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_reverse, bench_insert_random,);

criterion_group!(read_benches, bench_find_random, bench_iter,);

criterion_group!(remove_benches, bench_remove_random,);

criterion_main!(insert_benches, read_benches, remove_benches,);
