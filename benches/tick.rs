//! Benchmarks for the CPU-side simulation.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use driftfield::{ParticleConfig, ParticleSystem, SpriteInstance, SpriteStore, Vec2};

const BOUNDS: Vec2 = Vec2::new(1920.0, 1080.0);

fn system(count: u32) -> ParticleSystem<SpriteStore> {
    let config = ParticleConfig::default().with_particle_count(count);
    ParticleSystem::seeded(config, BOUNDS, SpriteStore::new(), 42)
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for count in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut sys = system(count);
            b.iter(|| {
                sys.tick();
                black_box(sys.tick_count())
            })
        });
    }

    group.finish();
}

fn bench_pointer(c: &mut Criterion) {
    let mut sys = system(1_000);
    c.bench_function("on_pointer_move/1000", |b| {
        b.iter(|| sys.on_pointer_move(black_box(Vec2::new(3.0, -2.0))))
    });
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("on_resize");

    // Alternating 10% changes never cross the threshold.
    group.bench_function("reposition/1000", |b| {
        let mut sys = system(1_000);
        let mut wide = false;
        b.iter(|| {
            wide = !wide;
            let width = if wide { BOUNDS.x * 1.1 } else { BOUNDS.x };
            black_box(sys.on_resize(Vec2::new(width, BOUNDS.y)))
        })
    });

    group.bench_function("regenerate/1000", |b| {
        let mut sys = system(1_000);
        let mut wide = false;
        b.iter(|| {
            wide = !wide;
            let width = if wide { BOUNDS.x * 2.0 } else { BOUNDS.x };
            black_box(sys.on_resize(Vec2::new(width, BOUNDS.y)))
        })
    });

    group.finish();
}

fn bench_upload(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_instances");

    for count in [1_000, 10_000] {
        let sys = system(count);
        let mut out: Vec<SpriteInstance> = Vec::with_capacity(count as usize);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                sys.surface().write_instances(&mut out);
                black_box(out.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_pointer, bench_resize, bench_upload);
criterion_main!(benches);
