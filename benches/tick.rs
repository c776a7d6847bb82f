//! Benchmarks for the per-frame update.
//!
//! Run with: `cargo bench --bench tick`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use morphfield::{Config, ExplosionPool, FrameInput, MorphField, ParticleSimulator, Shape};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn bench_cloud_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("cloud_tick");
    let mut rng = SmallRng::seed_from_u64(1);

    for shape in [Shape::Sphere, Shape::Saturn, Shape::Tornado] {
        group.bench_function(shape.id(), |b| {
            let mut cloud = ParticleSimulator::new(15_000, shape, &mut rng);
            let mut t = 0.0;
            b.iter(|| {
                t += 0.01;
                cloud.tick(black_box(t), 1.0, Some(Vec2::new(0.2, 0.1)));
            })
        });
    }

    group.finish();
}

fn bench_field_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_tick");

    for count in [1_000, 15_000, 50_000] {
        group.bench_with_input(BenchmarkId::new("particles", count), &count, |b, &count| {
            let config = Config::default().with_particle_count(count).with_seed(2);
            let Ok(mut field) = MorphField::new(config) else {
                return;
            };
            let input = FrameInput::with_pointer(Vec2::new(0.1, -0.1));
            b.iter(|| field.tick(black_box(&input)))
        });
    }

    group.finish();
}

fn bench_explosions(c: &mut Criterion) {
    c.bench_function("explosion_burst_and_tick", |b| {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut pool = ExplosionPool::new(500);
        b.iter(|| {
            pool.spawn_burst(black_box(Vec3::ZERO), Vec3::new(0.0, 1.0, 1.0), &mut rng);
            pool.tick();
        })
    });
}

criterion_group!(benches, bench_cloud_tick, bench_field_tick, bench_explosions,);
criterion_main!(benches);
