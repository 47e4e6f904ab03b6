use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use schedule_tree::{AvlTreeMap, BstMap};

const N: usize = 100_000;
const SORTED_N: usize = 2_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("bst_insert", |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for value in &values {
                map.insert(*value, *value);
            }
            map
        })
    });

    c.bench_function("avl_insert", |b| {
        b.iter(|| {
            let mut map = AvlTreeMap::new();
            for value in &values {
                map.insert(*value, *value);
            }
            map
        })
    });

    c.bench_function("bst_insert_sorted", |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for value in 0..SORTED_N {
                map.insert(value, ());
            }
            map
        })
    });

    c.bench_function("avl_insert_sorted", |b| {
        b.iter(|| {
            let mut map = AvlTreeMap::new();
            for value in 0..SORTED_N {
                map.insert(value, ());
            }
            map
        })
    });

    let bst: BstMap<i32, i32> = values.iter().map(|value| (*value, *value)).collect();
    let avl: AvlTreeMap<i32, i32> = values.iter().map(|value| (*value, *value)).collect();

    c.bench_function("bst_get", |b| {
        b.iter(|| {
            for value in &values {
                black_box(bst.get(value));
            }
        })
    });

    c.bench_function("avl_get", |b| {
        b.iter(|| {
            for value in &values {
                black_box(avl.get(value));
            }
        })
    });

    c.bench_function("avl_iter", |b| {
        b.iter(|| {
            for (k, v) in &avl {
                black_box((k, v));
            }
        })
    });

    c.bench_function("bst_height", |b| b.iter(|| black_box(bst.height())));

    c.bench_function("avl_height", |b| b.iter(|| black_box(avl.height())));
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
