#[macro_use]
extern crate criterion;
extern crate balanced_collections;
extern crate rand;

use balanced_collections::rbtree::RedBlackSet;
use criterion::{Criterion, black_box};
use rand::Rng;
use std::collections::BTreeSet;

fn bench_rbtree_insert(c: &mut Criterion) {
    c.bench_function("rbtree_insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = RedBlackSet::new();
            for _ in 0..100 {
                set.insert(rng.gen::<u32>());
            }
        })
    });
}

fn bench_rbtree_contains(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = RedBlackSet::new();
    let mut entries = Vec::new();

    for _ in 0..100 {
        let entry = rng.gen::<u32>();

        set.insert(entry);
        entries.push(entry);
    }

    c.bench_function("rbtree_contains", move |b| {
        b.iter(|| {
            for entry in &entries {
                black_box(set.contains(entry));
            }
        })
    });
}

fn bench_rbtree_remove(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut entries = Vec::new();

    for _ in 0..100 {
        entries.push(rng.gen::<u32>());
    }

    c.bench_function("rbtree_remove", move |b| {
        b.iter(|| {
            let mut set = RedBlackSet::new();
            for entry in &entries {
                set.insert(*entry);
            }
            for entry in &entries {
                black_box(set.remove(entry));
            }
        })
    });
}

fn bench_btreeset_insert(c: &mut Criterion) {
    c.bench_function("btreeset_insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = BTreeSet::new();
            for _ in 0..100 {
                set.insert(rng.gen::<u32>());
            }
        })
    });
}

fn bench_btreeset_contains(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = BTreeSet::new();
    let mut entries = Vec::new();

    for _ in 0..100 {
        let entry = rng.gen::<u32>();

        set.insert(entry);
        entries.push(entry);
    }

    c.bench_function("btreeset_contains", move |b| {
        b.iter(|| {
            for entry in &entries {
                black_box(set.contains(entry));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_rbtree_insert,
    bench_rbtree_contains,
    bench_rbtree_remove,
    bench_btreeset_insert,
    bench_btreeset_contains,
);
criterion_main!(benches);
