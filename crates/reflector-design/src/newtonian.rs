// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Newtonian Generator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Paraboloid primary folded sideways by a flat 45° diagonal.
//!
//! The diagonal sits an intercept distance in front of the primary focus and
//! sends the beam to +x, so the focal plane lies beside the tube. There is
//! no magnification: the system f-ratio equals the primary f-ratio.

use crate::generator::{
    assemble, edge_field_angle, field_angles, sensor_radius, throughput_metrics, FRatioTrial,
};
use reflector_types::config::{DesignKind, InputSpec};
use reflector_types::optics::{
    Aperture, ConicSurface, EntranceSpec, Material, OpticalPlan, PlaneSurface, SagSign, SensorSpec,
    Surface,
};
use reflector_types::state::{Candidate, CandidateInputs, GeometryMetrics};
use reflector_types::vec3::Vec3;
use std::f64::consts::SQRT_2;

/// Diagonal-to-focus distance as a fraction of the primary focal length.
pub const INTERCEPT_FRACTION: f64 = 0.15;
/// Launch plane height above the primary focus, in apertures.
const LAUNCH_CLEARANCE: f64 = 0.1;

/// Diagonal minor axis [mm]: converging cone plus edge-field chief offset.
pub fn diagonal_minor_axis(aperture_mm: f64, focal_mm: f64, intercept_mm: f64, field_angle: f64) -> f64 {
    let cone = 0.5 * aperture_mm * intercept_mm / focal_mm;
    let chief = (focal_mm - intercept_mm) * field_angle.tan();
    2.0 * (cone + chief)
}

/// Generate a Newtonian candidate; the trial's system f-ratio is ignored.
pub fn generate(spec: &InputSpec, trial: FRatioTrial) -> Option<Candidate> {
    let aperture = spec.aperture_mm();
    let fp = trial.primary_f_ratio;
    let field_radius = spec.field_radius_mm();
    if !aperture.is_finite() || !fp.is_finite() || aperture <= 0.0 || fp <= 0.0 {
        return None;
    }
    if !field_radius.is_finite() || field_radius < 0.0 {
        return None;
    }

    let focal = fp * aperture;
    let intercept = INTERCEPT_FRACTION * focal;
    let diagonal_z = focal - intercept;
    let field_angle = edge_field_angle(field_radius, focal);
    let minor = diagonal_minor_axis(aperture, focal, intercept, field_angle);
    let obstruction_ratio = minor / aperture;
    let reflectivity = spec.optics.mirror_reflectivity;

    let primary = Surface::Conic(ConicSurface {
        label: "primary".into(),
        z0: 0.0,
        radius: 2.0 * focal,
        conic: -1.0,
        sag_sign: SagSign::Positive,
        aperture: Aperture::circular(0.5 * aperture),
        material: Material::Reflector { reflectivity },
    });
    // In-plane radius covering the elliptical footprint's major semi-axis.
    let diagonal = Surface::Plane(PlaneSurface {
        label: "diagonal".into(),
        point: Vec3::new(0.0, 0.0, diagonal_z),
        normal: Vec3::new(1.0, 0.0, -1.0).normalized(),
        aperture: Aperture::circular(0.5 * minor * SQRT_2),
        material: Material::Reflector { reflectivity },
    });

    let plan = OpticalPlan {
        surfaces: vec![primary, diagonal],
        entrance: EntranceSpec {
            launch_z: focal + LAUNCH_CLEARANCE * aperture,
            pupil_radius: 0.5 * aperture,
            obstruction_radius: 0.5 * minor,
            field_angles: field_angles(field_angle),
        },
        sensor: SensorSpec::new(
            Vec3::new(intercept, 0.0, diagonal_z),
            -Vec3::X,
            sensor_radius(field_radius, aperture),
        ),
        nominal_reflections: Some(2),
    };

    let inputs = CandidateInputs {
        aperture_mm: aperture,
        primary_f_ratio: fp,
        system_f_ratio: fp,
        primary_focal_length_mm: focal,
        system_focal_length_mm: focal,
    };
    let geometry = GeometryMetrics {
        tube_length_mm: focal + spec.tube_margin_mm(),
        backfocus_mm: intercept,
        mirror_spacing_mm: diagonal_z,
        secondary_diameter_mm: minor,
        obstruction_diameter_mm: minor,
        obstruction_ratio,
    };
    let throughput = throughput_metrics(aperture, obstruction_ratio, reflectivity, 2, 1.0);

    Some(assemble(
        DesignKind::Newtonian,
        spec,
        inputs,
        geometry,
        throughput,
        plan,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflector_types::config::Length;

    fn twelve_inch() -> InputSpec {
        InputSpec {
            aperture: Length::inch(12.0),
            ..InputSpec::default()
        }
    }

    #[test]
    fn test_tube_length_is_focal_plus_margin() {
        let c = generate(&twelve_inch(), FRatioTrial::new(4.5, 99.0)).expect("valid");
        assert!((c.geometry.tube_length_mm - (4.5 * 304.8 + 25.0)).abs() < 1e-9);
        assert!((c.inputs.system_f_ratio - 4.5).abs() < 1e-12);
        assert_eq!(c.throughput.mirror_count, 2);
        assert!((c.throughput.transmission_factor - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_minor_axis() {
        let minor = diagonal_minor_axis(304.8, 1219.2, 182.88, 0.0);
        // Cone only: D · intercept / f
        assert!((minor - 304.8 * 0.15).abs() < 1e-9);
        assert!(diagonal_minor_axis(304.8, 1219.2, 182.88, 0.01) > minor);
    }

    #[test]
    fn test_on_axis_image_is_sharp() {
        let c = generate(&twelve_inch(), FRatioTrial::new(5.0, 5.0)).expect("valid");
        let simulation = c.simulation.expect("simulation payload");
        let on_axis = &simulation.fields[0];
        assert!(on_axis.spot.n_hits >= 3, "hits = {}", on_axis.spot.n_hits);
        assert!(on_axis.spot.rms_radius < 1e-6, "rms = {}", on_axis.spot.rms_radius);
    }

    #[test]
    fn test_edge_field_has_coma() {
        let c = generate(&twelve_inch(), FRatioTrial::new(4.0, 4.0)).expect("valid");
        assert!(c.image_quality.coma_waves.is_finite());
        assert!(c.image_quality.coma_waves > c.image_quality.spherical_waves);
        assert!(c.image_quality.wfe_rms_waves_edge.is_finite());
    }

    #[test]
    fn test_faster_primary_has_more_coma() {
        let spec = twelve_inch();
        let fast = generate(&spec, FRatioTrial::new(4.0, 4.0)).expect("valid");
        let slow = generate(&spec, FRatioTrial::new(6.0, 6.0)).expect("valid");
        assert!(fast.image_quality.coma_waves > slow.image_quality.coma_waves);
    }

    #[test]
    fn test_invalid_trial_rejected() {
        let spec = twelve_inch();
        assert!(generate(&spec, FRatioTrial::new(0.0, 0.0)).is_none());
        assert!(generate(&spec, FRatioTrial::new(f64::NAN, 0.0)).is_none());
        let no_aperture = InputSpec {
            aperture: Length::mm(0.0),
            ..InputSpec::default()
        };
        assert!(generate(&no_aperture, FRatioTrial::new(4.0, 4.0)).is_none());
    }
}
