// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Intersection Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use reflector_math::intersect::{intersect_conic, intersect_plane, Ray};
use reflector_types::optics::{Aperture, ConicSurface, Material, PlaneSurface, SagSign};
use reflector_types::vec3::Vec3;
use std::hint::black_box;

fn primary(conic: f64) -> ConicSurface {
    ConicSurface {
        label: "primary".into(),
        z0: 0.0,
        radius: 2438.4,
        conic,
        sag_sign: SagSign::Positive,
        aperture: Aperture::annular(152.4, 30.0),
        material: Material::Reflector { reflectivity: 0.92 },
    }
}

fn bench_conic_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("conic_intersection");
    let rays: Vec<Ray> = (0..64)
        .map(|i| {
            let y = -150.0 + 300.0 * (i as f64) / 63.0;
            Ray::new(Vec3::new(20.0, y, 1500.0), Vec3::new(0.0, 0.004, -1.0))
        })
        .collect();

    for &(label, k) in &[("sphere", 0.0), ("paraboloid", -1.0), ("hyperboloid", -1.15)] {
        let surface = primary(k);
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for ray in &rays {
                    if intersect_conic(&surface, ray).is_some() {
                        hits += 1;
                    }
                }
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_plane_intersection(c: &mut Criterion) {
    let plane = PlaneSurface {
        label: "sensor".into(),
        point: Vec3::new(0.0, 0.0, -100.0),
        normal: Vec3::Z,
        aperture: Aperture::circular(40.0),
        material: Material::Absorber,
    };
    let ray = Ray::new(Vec3::new(5.0, -3.0, 800.0), Vec3::new(0.01, 0.0, -1.0));
    c.bench_function("plane_intersection", |b| {
        b.iter(|| black_box(intersect_plane(&plane, black_box(&ray))))
    });
}

criterion_group!(benches, bench_conic_intersection, bench_plane_intersection);
criterion_main!(benches);
