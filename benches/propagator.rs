//! Benchmarks for Lenia propagator.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use lenia_sim::{
    compute::{Kernel, Propagator},
    schema::{Pattern, Seed, SimulationConfig},
};

fn bench_propagator_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagator_step");

    for size in [64, 128, 256, 512] {
        let config = SimulationConfig {
            width: size,
            height: size,
            ..SimulationConfig::default()
        };

        let mut propagator = Propagator::new(config, Seed::new(Pattern::Noise, 1))
            .expect("benchmark config is valid");

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    black_box(&mut propagator).step();
                });
            },
        );
    }

    group.finish();
}

fn bench_kernel_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_radius");

    for radius in [5.0f32, 13.0, 20.0, 30.0] {
        let config = SimulationConfig {
            width: 128,
            height: 128,
            kernel_radius: radius,
            ..SimulationConfig::default()
        };

        let mut propagator = Propagator::new(config, Seed::new(Pattern::Orbium, 0))
            .expect("benchmark config is valid");

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("R{}", radius)),
            &radius,
            |b, _| {
                b.iter(|| {
                    black_box(&mut propagator).step();
                });
            },
        );
    }

    group.finish();
}

fn bench_kernel_build(c: &mut Criterion) {
    c.bench_function("kernel_build_R13", |b| {
        b.iter(|| Kernel::new(black_box(13.0)));
    });
}

criterion_group!(
    benches,
    bench_propagator_step,
    bench_kernel_radius,
    bench_kernel_build
);
criterion_main!(benches);
