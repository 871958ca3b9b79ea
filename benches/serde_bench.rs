//! Benchmark for serde serialization/deserialization of trees.
//!
//! Compares against `BTreeMap`, which uses the same map encoding.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use tree234::tree::Tree;

// =============================================================================
// Serialize
// =============================================================================

fn benchmark_serialize(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("serde_serialize_tree");

    for size in [100, 1000, 10000] {
        let tree: Tree<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        group.bench_with_input(BenchmarkId::new("Tree", size), &size, |bencher, _| {
            bencher.iter(|| {
                let json = serde_json::to_string(&tree).unwrap();
                black_box(json)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let json = serde_json::to_string(&standard_map).unwrap();
                black_box(json)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Deserialize
// =============================================================================

fn benchmark_deserialize(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("serde_deserialize_tree");

    for size in [100, 1000, 10000] {
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let json = serde_json::to_string(&standard_map).unwrap();

        group.bench_with_input(BenchmarkId::new("Tree", size), &json, |bencher, json| {
            bencher.iter(|| {
                let tree: Tree<i32, i32> = serde_json::from_str(black_box(json)).unwrap();
                black_box(tree)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &json, |bencher, json| {
            bencher.iter(|| {
                let map: BTreeMap<i32, i32> = serde_json::from_str(black_box(json)).unwrap();
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(benches, benchmark_serialize, benchmark_deserialize);

criterion_main!(benches);
