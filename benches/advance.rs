//! Benchmarks for per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use std::time::Duration;

use snowfield::{
    BoundingShape, FieldConfig, MotionPolicy, ObjectKind, PickHighlighter, PickableObject, Ray,
    Rgb,
};

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    let policies = [
        MotionPolicy::blizzard(),
        MotionPolicy::snowfall(),
        MotionPolicy::orbit(15.0),
        MotionPolicy::drift(),
    ];

    for policy in policies {
        for count in [1_000usize, 10_000] {
            let mut field = FieldConfig::new()
                .with_count(count)
                .with_policy(policy)
                .with_seed(1)
                .build()
                .expect("valid field");
            group.bench_with_input(BenchmarkId::new(policy.name(), count), &count, |b, _| {
                b.iter(|| {
                    field.advance(black_box(1.0 / 60.0));
                    black_box(field.positions());
                })
            });
        }
    }

    group.finish();
}

fn bench_pick(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick");

    let shapes = [
        ("cone", BoundingShape::Cone { radius: 1.5, height: 10.0 }),
        ("sphere", BoundingShape::Sphere { radius: 1.0 }),
        ("tetrahedron", BoundingShape::Tetrahedron { radius: 0.5 }),
    ];

    for (name, shape) in shapes {
        let mut objects: Vec<PickableObject> = (0..64)
            .map(|i| {
                let x = (i % 8) as f64 * 4.0 - 14.0;
                let z = (i / 8) as f64 * -4.0 - 5.0;
                PickableObject::new(ObjectKind::Rock, shape, DVec3::new(x, 0.0, z), Rgb::ROCK)
                    .expect("valid object")
            })
            .collect();
        let ray = Ray::towards(DVec3::new(0.0, 2.0, 10.0), DVec3::new(-2.0, 0.0, -15.0))
            .expect("non-degenerate ray");
        let mut highlighter = PickHighlighter::default();
        let mut now = Duration::ZERO;

        group.bench_function(name, |b| {
            b.iter(|| {
                now += Duration::from_millis(1);
                black_box(highlighter.pick(&ray, &mut objects, now));
                highlighter.poll_reversions(now, &mut objects);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance, bench_pick);
criterion_main!(benches);
