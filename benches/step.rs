//! Benchmarks for the CPU-side simulation step.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pyre::{FireField, FireRng};

fn bench_field_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");

    for density in [100u32, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(density),
            &density,
            |b, &density| {
                let mut rng = FireRng::new(42);
                let mut field = FireField::new(density, 1.0, 5.0, &mut rng);
                b.iter(|| {
                    field.step(&mut rng);
                    black_box(field.take_dirty());
                })
            },
        );
    }

    group.finish();
}

fn bench_matrix_composition(c: &mut Criterion) {
    let mut rng = FireRng::new(42);
    let field = FireField::new(10_000, 1.0, 5.0, &mut rng);

    c.bench_function("matrices_10k", |b| b.iter(|| black_box(field.matrices())));
}

criterion_group!(benches, bench_field_step, bench_matrix_composition);
criterion_main!(benches);
