use criterion::{criterion_group, criterion_main, Criterion};
extern crate loopfield as lib;

use lib::configuration::FieldConfiguration;
use lib::magnetic::{total_field_with, AzimuthConvention};

fn criterion_benchmark(c: &mut Criterion) {
    let configuration = FieldConfiguration::helmholtz();
    let points = configuration.grid.points();

    c.bench_function("helmholtz 31^3 legacy", |b| {
        b.iter(|| total_field_with(&points, &configuration.loops, AzimuthConvention::Legacy))
    });
    c.bench_function("helmholtz 31^3 cylindrical", |b| {
        b.iter(|| total_field_with(&points, &configuration.loops, AzimuthConvention::Cylindrical))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
