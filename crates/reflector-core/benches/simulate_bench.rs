// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Simulator Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use reflector_core::simulator::simulate;
use reflector_types::optics::{
    Aperture, ConicSurface, EntranceSpec, Material, OpticalPlan, PupilSampling, SagSign,
    SampleSpec, SensorSpec, Surface,
};
use reflector_types::vec3::Vec3;
use std::hint::black_box;

fn prime_focus(focal: f64, pupil_radius: f64) -> OpticalPlan {
    OpticalPlan {
        surfaces: vec![Surface::Conic(ConicSurface {
            label: "primary".into(),
            z0: 0.0,
            radius: 2.0 * focal,
            conic: -1.0,
            sag_sign: SagSign::Positive,
            aperture: Aperture::circular(pupil_radius),
            material: Material::Reflector { reflectivity: 0.92 },
        })],
        entrance: EntranceSpec {
            launch_z: 1.1 * focal,
            pupil_radius,
            obstruction_radius: 0.3 * pupil_radius,
            field_angles: vec![0.0, 0.005],
        },
        sensor: SensorSpec::new(Vec3::new(0.0, 0.0, focal), -Vec3::Z, 0.2 * pupil_radius),
        nominal_reflections: Some(1),
    }
}

fn bench_simulate(c: &mut Criterion) {
    let plan = prime_focus(1219.2, 152.4);
    let mut group = c.benchmark_group("simulate_prime_focus");
    for &steps in &[7usize, 11, 21] {
        let sample = SampleSpec {
            pupil: PupilSampling { steps },
            ..SampleSpec::default()
        };
        group.bench_function(format!("steps_{steps}"), |b| {
            b.iter(|| black_box(simulate(black_box(&plan), &sample)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_simulate);
criterion_main!(benches);
