// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Optical Simulator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Multi-bounce ray-bundle tracer with per-field best-focus search.
//!
//! For each field angle a collimated, pupil-sampled bundle is launched. The
//! sensor is stepped ±4 planes around its nominal position and the plane with
//! the smallest centroid-referenced RMS spot wins; the full bundle is then
//! re-traced there for the reported traces and spot statistics. Only paths
//! with the plan's nominal reflection count enter the spot.

use ndarray::{Array2, Axis};
use reflector_math::geometry::{plane_basis, project_to_plane};
use reflector_math::intersect::{intersect, intersect_plane, reflect, Ray};
use reflector_math::surface::surface_normal;
use reflector_types::constants::{
    FOCUS_HALF_STEPS, FOCUS_MIN_STEP_MM, FOCUS_STEP_FRACTION, MIN_SPOT_HITS, SELF_HIT_EPS,
};
use reflector_types::optics::{EntranceSpec, Material, OpticalPlan, PlaneSurface, SampleSpec, Surface};
use reflector_types::state::{FieldResult, RayPath, SimulationResult, SpotStats};
use reflector_types::vec3::Vec3;

/// Tangential axis: field angles tilt rays in the y-z plane.
const TANGENTIAL_AXIS: Vec3 = Vec3::Y;

enum Target {
    Surface(usize),
    Sensor,
}

/// Cell-centred square grid over the pupil, keeping points inside the
/// clear annulus [obstruction_radius, pupil_radius].
pub fn pupil_grid(entrance: &EntranceSpec, steps: usize) -> Vec<(f64, f64)> {
    let r = entrance.pupil_radius;
    if steps == 0 || !r.is_finite() || r <= 0.0 {
        return Vec::new();
    }
    let inner = entrance.obstruction_radius.max(0.0);
    let mut points = Vec::with_capacity(steps * steps);
    for iy in 0..steps {
        let y = -r + r * (2 * iy + 1) as f64 / steps as f64;
        for ix in 0..steps {
            let x = -r + r * (2 * ix + 1) as f64 / steps as f64;
            let rho = x.hypot(y);
            if rho <= r && rho >= inner {
                points.push((x, y));
            }
        }
    }
    points
}

/// Parallel rays tilted by `field_angle`, aimed so the bundle is centred on
/// the primary vertex plane z = 0.
pub fn launch_rays(entrance: &EntranceSpec, field_angle: f64, pupil: &[(f64, f64)]) -> Vec<Ray> {
    let direction = Vec3::new(0.0, field_angle.sin(), -field_angle.cos());
    let lift = entrance.launch_z / field_angle.cos();
    pupil
        .iter()
        .map(|&(x, y)| Ray::new(Vec3::new(x, y, 0.0) - direction * lift, direction))
        .collect()
}

/// Propagate one ray until it is absorbed, lost, or out of bounces.
pub fn trace_ray(
    surfaces: &[Surface],
    sensor: &PlaneSurface,
    ray: Ray,
    max_bounces: usize,
) -> RayPath {
    let mut current = ray;
    let mut segments = Vec::new();
    let mut throughput = 1.0;
    let mut reflections = 0;

    for _ in 0..max_bounces {
        let mut nearest: Option<(f64, Vec3, Target)> = None;
        for (i, surface) in surfaces.iter().enumerate() {
            if let Some(hit) = intersect(surface, &current) {
                if hit.t > SELF_HIT_EPS && nearest.as_ref().is_none_or(|(t, _, _)| hit.t < *t) {
                    nearest = Some((hit.t, hit.point, Target::Surface(i)));
                }
            }
        }
        if let Some(hit) = intersect_plane(sensor, &current) {
            if hit.t > SELF_HIT_EPS && nearest.as_ref().is_none_or(|(t, _, _)| hit.t < *t) {
                nearest = Some((hit.t, hit.point, Target::Sensor));
            }
        }

        let Some((_, point, target)) = nearest else {
            break;
        };
        segments.push((current.origin, point));

        let index = match target {
            Target::Sensor => {
                return RayPath {
                    segments,
                    sensor_hit: Some(point),
                    throughput,
                    reflections,
                }
            }
            Target::Surface(i) => i,
        };

        let surface = &surfaces[index];
        match surface.material() {
            Material::Absorber => break,
            Material::Reflector { reflectivity } => {
                throughput *= reflectivity;
                reflections += 1;
                let normal = surface_normal(surface, point);
                current = Ray::new(point, reflect(current.direction, normal));
            }
            Material::Transmitter { transmission } => {
                throughput *= transmission;
                current = Ray::new(point, current.direction);
            }
        }
    }

    RayPath {
        segments,
        sensor_hit: None,
        throughput,
        reflections,
    }
}

/// Centroid-referenced RMS of sensor hits in the sensor's (u, v) basis.
pub fn spot_stats(hits: &[Vec3], sensor: &PlaneSurface) -> SpotStats {
    let n = hits.len();
    if n < MIN_SPOT_HITS {
        return SpotStats::degenerate(n);
    }
    let (u, v) = plane_basis(sensor.normal, TANGENTIAL_AXIS);
    let mut coords = Array2::<f64>::zeros((n, 2));
    for (i, p) in hits.iter().enumerate() {
        let (a, b) = project_to_plane(*p, sensor.point, u, v);
        coords[[i, 0]] = a;
        coords[[i, 1]] = b;
    }

    let Some(centroid) = coords.mean_axis(Axis(0)) else {
        return SpotStats::degenerate(n);
    };
    let var_u = coords
        .column(0)
        .mapv(|a| (a - centroid[0]).powi(2))
        .mean()
        .unwrap_or(f64::NAN);
    let var_v = coords
        .column(1)
        .mapv(|b| (b - centroid[1]).powi(2))
        .mean()
        .unwrap_or(f64::NAN);

    SpotStats {
        n_hits: n,
        centroid_u: centroid[0],
        centroid_v: centroid[1],
        rms_radius: (var_u + var_v).sqrt(),
        rms_tangential: var_u.sqrt(),
        rms_sagittal: var_v.sqrt(),
    }
}

/// Evenly strided subset of at most `count` rays (0 keeps all).
fn focus_subset(rays: &[Ray], count: usize) -> Vec<Ray> {
    if count == 0 || count >= rays.len() {
        return rays.to_vec();
    }
    (0..count).map(|i| rays[i * rays.len() / count]).collect()
}

/// Sensor hits of imaging paths only.
fn image_hits<'a>(plan: &OpticalPlan, paths: impl IntoIterator<Item = &'a RayPath>) -> Vec<Vec3> {
    paths
        .into_iter()
        .filter(|p| plan.is_imaging_path(p.reflections))
        .filter_map(|p| p.sensor_hit)
        .collect()
}

/// Focus search step [mm] for a plan.
pub fn focus_step(plan: &OpticalPlan) -> f64 {
    FOCUS_MIN_STEP_MM.max(plan.sensor.nominal_distance() * FOCUS_STEP_FRACTION)
}

/// Sensor offset with minimum RMS spot over the ±4-step window.
///
/// Returns `(NaN, degenerate)` when no plane collects enough hits.
pub fn best_focus(plan: &OpticalPlan, rays: &[Ray], max_bounces: usize) -> (f64, SpotStats) {
    let step = focus_step(plan);
    let mut best: Option<(f64, SpotStats)> = None;

    for k in -FOCUS_HALF_STEPS..=FOCUS_HALF_STEPS {
        let offset = k as f64 * step;
        let sensor = plan.sensor.plane.shifted(offset);
        let paths: Vec<RayPath> = rays
            .iter()
            .map(|ray| trace_ray(&plan.surfaces, &sensor, *ray, max_bounces))
            .collect();
        let hits = image_hits(plan, &paths);
        let stats = spot_stats(&hits, &sensor);
        if !stats.rms_radius.is_finite() {
            continue;
        }
        if best
            .as_ref()
            .is_none_or(|(_, b)| stats.rms_radius < b.rms_radius)
        {
            best = Some((offset, stats));
        }
    }

    best.unwrap_or((f64::NAN, SpotStats::degenerate(0)))
}

/// Focus search then full-bundle trace for one field angle.
pub fn simulate_field(plan: &OpticalPlan, sample: &SampleSpec, field_angle: f64) -> FieldResult {
    let pupil = pupil_grid(&plan.entrance, sample.pupil.steps);
    let rays = launch_rays(&plan.entrance, field_angle, &pupil);
    let subset = focus_subset(&rays, sample.rays_per_field);
    let (focus_offset, _) = best_focus(plan, &subset, sample.max_bounces);

    let sensor = if focus_offset.is_finite() {
        plan.sensor.plane.shifted(focus_offset)
    } else {
        plan.sensor.plane.clone()
    };
    let paths: Vec<RayPath> = rays
        .iter()
        .map(|ray| trace_ray(&plan.surfaces, &sensor, *ray, sample.max_bounces))
        .collect();
    let hits = image_hits(plan, &paths);
    let spot = if focus_offset.is_finite() {
        spot_stats(&hits, &sensor)
    } else {
        SpotStats::degenerate(hits.len())
    };

    log::debug!(
        "field {:.5} rad: {} rays, {} imaged, {} stray, focus {:+.3} mm, rms {:.3e} mm",
        field_angle,
        rays.len(),
        hits.len(),
        paths.iter().filter(|p| p.sensor_hit.is_some()).count() - hits.len(),
        focus_offset,
        spot.rms_radius
    );

    FieldResult {
        field_angle,
        focus_offset,
        spot,
        rays: paths,
    }
}

/// Trace every field angle of `plan`.
pub fn simulate(plan: &OpticalPlan, sample: &SampleSpec) -> SimulationResult {
    let fields = plan
        .entrance
        .field_angles
        .iter()
        .map(|&angle| simulate_field(plan, sample, angle))
        .collect();
    SimulationResult { fields }
}
