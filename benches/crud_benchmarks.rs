use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};
use std::hint::black_box;
use avl_ostree::{OSTreeMap, OSTreeSet};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert");

    for (order, keys) in key_orders() {
        group.bench_function(BenchmarkId::new("OSTreeMap", order), |b| {
            b.iter(|| {
                let mut map = OSTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", order), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });
    }

    group.finish();
}

fn bench_map_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_get");

    for (order, keys) in key_orders() {
        let os_map: OSTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("OSTreeMap", order), |b| {
            b.iter(|| keys.iter().filter_map(|k| os_map.get(k)).sum::<i64>());
        });

        group.bench_function(BenchmarkId::new("BTreeMap", order), |b| {
            b.iter(|| keys.iter().filter_map(|k| bt_map.get(k)).sum::<i64>());
        });
    }

    group.finish();
}

fn bench_map_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_remove");

    for (order, keys) in key_orders() {
        group.bench_function(BenchmarkId::new("OSTreeMap", order), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<OSTreeMap<i64, i64>>(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", order), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_insert");

    for (order, keys) in key_orders() {
        group.bench_function(BenchmarkId::new("OSTreeSet", order), |b| {
            b.iter(|| keys.iter().copied().collect::<OSTreeSet<i64>>());
        });

        group.bench_function(BenchmarkId::new("BTreeSet", order), |b| {
            b.iter(|| keys.iter().copied().collect::<BTreeSet<i64>>());
        });
    }

    group.finish();
}

fn bench_set_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_contains");

    for (order, keys) in key_orders() {
        let os_set: OSTreeSet<i64> = keys.iter().copied().collect();
        let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

        group.bench_function(BenchmarkId::new("OSTreeSet", order), |b| {
            b.iter(|| keys.iter().filter(|k| os_set.contains(*k)).count());
        });

        group.bench_function(BenchmarkId::new("BTreeSet", order), |b| {
            b.iter(|| keys.iter().filter(|k| bt_set.contains(*k)).count());
        });
    }

    group.finish();
}

fn bench_set_pop_first(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_pop_first");

    group.bench_function(BenchmarkId::new("OSTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<OSTreeSet<i64>>(),
            |mut set| while set.pop_first().is_some() {},
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| while set.pop_first().is_some() {},
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Order-statistic Benchmarks ─────────────────────────────────────────────

fn bench_set_get_by_rank(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_set: OSTreeSet<i64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();
    let ranks: Vec<usize> = (0..os_set.len()).step_by(97).collect();

    let mut group = c.benchmark_group("set_get_by_rank");

    group.bench_function(BenchmarkId::new("OSTreeSet", N), |b| {
        b.iter(|| ranks.iter().filter_map(|&r| os_set.get_by_rank(black_box(r))).sum::<i64>());
    });

    // Linear baseline: std has no rank index.
    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| ranks.iter().filter_map(|&r| bt_set.iter().nth(black_box(r))).sum::<i64>());
    });

    group.finish();
}

fn bench_set_count_at_most(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_set: OSTreeSet<i64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();
    let probes: Vec<i64> = keys.iter().step_by(97).copied().collect();

    let mut group = c.benchmark_group("set_count_at_most");

    group.bench_function(BenchmarkId::new("OSTreeSet", N), |b| {
        b.iter(|| probes.iter().map(|p| os_set.count_at_most(p)).sum::<usize>());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| probes.iter().map(|p| bt_set.range(..=p).count()).sum::<usize>());
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove);

criterion_group!(set_benches, bench_set_insert, bench_set_contains, bench_set_pop_first);

criterion_group!(order_statistic_benches, bench_set_get_by_rank, bench_set_count_at_most);

criterion_main!(map_benches, set_benches, order_statistic_benches);
