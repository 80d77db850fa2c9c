//! Accumulator hot-path micro-benchmark.
//!
//! - `add_sample` alone (sampling loop rate)
//! - `compute` over a realistic scan: 20 sections × 180 samples
//! - `section::aggregate` for one 180-sample section

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use frp::config::FrpConfig;
use frp_core::Accumulator;
use frp_core::buffer::Sample;
use frp_core::section;

const SAMPLES_PER_REV: usize = 180;
const SECTIONS: usize = 20;

fn reading(i: usize) -> (f64, f64, f64) {
    let angle = (i % SAMPLES_PER_REV) as f64 * 2.0;
    let a = angle.to_radians();
    (angle, 152.0 + 0.2 * a.sin(), 76.0 + 0.05 * a.cos())
}

fn bench_add_sample(c: &mut Criterion) {
    let acc = Accumulator::new(FrpConfig::default()).unwrap();
    let mut i = 0usize;
    c.bench_function("add_sample", |b| {
        b.iter(|| {
            let (a, o, n) = reading(i);
            i = i.wrapping_add(1);
            black_box(acc.add_sample(a, o, n).unwrap());
        })
    });
}

fn bench_compute(c: &mut Criterion) {
    let acc = Accumulator::new(FrpConfig::default()).unwrap();
    for i in 0..SAMPLES_PER_REV * SECTIONS {
        let (a, o, n) = reading(i);
        acc.add_sample(a, o, n).unwrap();
    }
    c.bench_function("compute_20x180", |b| b.iter(|| black_box(acc.compute())));
}

fn bench_aggregate(c: &mut Criterion) {
    let samples: Vec<Sample> = (0..SAMPLES_PER_REV)
        .map(|i| {
            let (a, o, n) = reading(i);
            Sample::new(a, o, n).unwrap()
        })
        .collect();
    c.bench_function("aggregate_180", |b| {
        b.iter(|| black_box(section::aggregate(0, black_box(&samples), 180)))
    });
}

criterion_group!(benches, bench_add_sample, bench_compute, bench_aggregate);
criterion_main!(benches);
