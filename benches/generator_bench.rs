//! Generator throughput benchmarks.
//!
//! Regeneration runs synchronously on the UI thread, so the default 50k
//! field has to come in well under a frame budget.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use whorl::generate;
use whorl::options::GalaxyOptions;

fn field_generation(c: &mut Criterion) {
    let params = GalaxyOptions::default();
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("generate_50k_points", |b| {
        b.iter(|| black_box(generate(black_box(&params), &mut rng)));
    });

    let small = GalaxyOptions {
        count: 1000,
        ..GalaxyOptions::default()
    };
    c.bench_function("generate_1k_points", |b| {
        b.iter(|| black_box(generate(black_box(&small), &mut rng)));
    });
}

criterion_group!(benches, field_generation);
criterion_main!(benches);
