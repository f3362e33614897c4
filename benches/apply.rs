//! Operator benchmarks over random formula workloads.
//!
//! Run with:
//! ```bash
//! cargo bench --bench apply
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use robdd::bdd::Bdd;
use robdd::signal::Signal;
use robdd::types::Var;

/// XOR-chain over all variables: linear in nodes, heavy on the computed
/// table when rebuilt under different associations.
fn xor_chain(bdd: &mut Bdd, order: &[u32]) -> Signal {
    let mut acc = bdd.zero();
    for &v in order {
        let x = bdd.literal(Var::new(v), false);
        acc = bdd.apply_xor(acc, x);
    }
    acc
}

/// A random read-once formula over the given variables.
fn random_formula(bdd: &mut Bdd, rng: &mut impl Rng, vars: &[u32]) -> Signal {
    let mut pool: Vec<Signal> = vars
        .iter()
        .map(|&v| bdd.literal(Var::new(v), rng.gen()))
        .collect();
    while pool.len() > 1 {
        let a = pool.swap_remove(rng.gen_range(0..pool.len()));
        let b = pool.swap_remove(rng.gen_range(0..pool.len()));
        let r = match rng.gen_range(0..3) {
            0 => bdd.apply_and(a, b),
            1 => bdd.apply_or(a, b),
            _ => bdd.apply_xor(a, b),
        };
        pool.push(r);
    }
    pool[0]
}

fn bench_xor_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("xor_chain");
    for num_vars in [8u32, 12, 16] {
        group.throughput(Throughput::Elements(num_vars as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_vars), &num_vars, |b, &n| {
            let order: Vec<u32> = (0..n).collect();
            b.iter(|| {
                let mut bdd = Bdd::new(n);
                xor_chain(&mut bdd, &order)
            });
        });
    }
    group.finish();
}

fn bench_random_formula(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_formula");
    for num_vars in [8u32, 12, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(num_vars), &num_vars, |b, &n| {
            let vars: Vec<u32> = (0..n).collect();
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(0xB00);
                let mut bdd = Bdd::new(n);
                random_formula(&mut bdd, &mut rng, &vars)
            });
        });
    }
    group.finish();
}

fn bench_cached_recall(c: &mut Criterion) {
    // Rebuild the same function after the computed tables are warm.
    c.bench_function("cached_recall", |b| {
        let n = 16u32;
        let order: Vec<u32> = (0..n).collect();
        let mut bdd = Bdd::new(n);
        let first = xor_chain(&mut bdd, &order);
        b.iter(|| {
            let again = xor_chain(&mut bdd, &order);
            assert_eq!(again, first);
            again
        });
    });
}

criterion_group!(benches, bench_xor_chain, bench_random_formula, bench_cached_recall);
criterion_main!(benches);
