// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Generator Dispatch
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shared candidate assembly for every design family.

use crate::constraints::check_constraints;
use crate::{cassegrain, newtonian, rc, sct};
use reflector_core::image_quality::adapt;
use reflector_core::simulator::simulate;
use reflector_types::config::{DesignKind, InputSpec};
use reflector_types::optics::OpticalPlan;
use reflector_types::state::{
    Candidate, CandidateInputs, GeometryMetrics, ImageQualityMetrics, SimulationResult,
    ThroughputMetrics,
};
use std::f64::consts::PI;

/// One (primary, system) f-ratio pair of the sweep grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FRatioTrial {
    pub primary_f_ratio: f64,
    pub system_f_ratio: f64,
}

impl FRatioTrial {
    pub fn new(primary_f_ratio: f64, system_f_ratio: f64) -> Self {
        FRatioTrial {
            primary_f_ratio,
            system_f_ratio,
        }
    }
}

/// Pure generator: `None` for a physically invalid trial.
pub type Generator = fn(&InputSpec, FRatioTrial) -> Option<Candidate>;

pub fn generator_for(kind: DesignKind) -> Generator {
    match kind {
        DesignKind::Newtonian => newtonian::generate,
        DesignKind::Cassegrain => cassegrain::generate,
        DesignKind::Sct => sct::generate,
        DesignKind::RitcheyChretien => rc::generate,
    }
}

/// Evaluate one trial with the generator for `kind`.
pub fn generate(kind: DesignKind, spec: &InputSpec, trial: FRatioTrial) -> Option<Candidate> {
    generator_for(kind)(spec, trial)
}

/// Edge field angle [rad] for a field radius at a focal length.
pub fn edge_field_angle(field_radius_mm: f64, focal_length_mm: f64) -> f64 {
    (field_radius_mm / focal_length_mm).atan()
}

/// On-axis plus edge, or on-axis alone for a zero field.
pub(crate) fn field_angles(edge: f64) -> Vec<f64> {
    if edge > 0.0 {
        vec![0.0, edge]
    } else {
        vec![0.0]
    }
}

/// Sensor radius wide enough for the field plus the defocused bundle.
pub(crate) fn sensor_radius(field_radius_mm: f64, aperture_mm: f64) -> f64 {
    2.0 * field_radius_mm + 0.1 * aperture_mm
}

pub(crate) fn throughput_metrics(
    aperture_mm: f64,
    obstruction_ratio: f64,
    reflectivity: f64,
    mirror_count: u32,
    transmission_factor: f64,
) -> ThroughputMetrics {
    let clear = 1.0 - obstruction_ratio * obstruction_ratio;
    let primary_area_mm2 = PI * (0.5 * aperture_mm).powi(2);
    ThroughputMetrics {
        primary_area_mm2,
        effective_area_mm2: primary_area_mm2 * clear,
        usable_light_efficiency: clear * reflectivity.powi(mirror_count as i32) * transmission_factor,
        mirror_count,
        transmission_factor,
    }
}

/// Trace the plan and reduce the result to image-quality metrics.
pub(crate) fn evaluate_plan(
    plan: &OpticalPlan,
    spec: &InputSpec,
    system_f_ratio: f64,
) -> (ImageQualityMetrics, SimulationResult) {
    let simulation = simulate(plan, &spec.sample);
    let on_axis = simulation.fields.first();
    let metrics = match simulation.fields.last() {
        Some(edge) => adapt(edge, system_f_ratio, on_axis),
        None => ImageQualityMetrics {
            field_angle: f64::NAN,
            coma_waves: f64::NAN,
            astigmatism_waves: f64::NAN,
            field_curvature_mm: f64::NAN,
            spherical_waves: f64::NAN,
            wfe_rms_waves_edge: f64::NAN,
            strehl_estimate: f64::NAN,
        },
    };
    (metrics, simulation)
}

/// Simulate, check against `spec.constraints` and build the candidate.
pub(crate) fn assemble(
    kind: DesignKind,
    spec: &InputSpec,
    inputs: CandidateInputs,
    geometry: GeometryMetrics,
    throughput: ThroughputMetrics,
    plan: OpticalPlan,
) -> Candidate {
    let (image_quality, simulation) = evaluate_plan(&plan, spec, inputs.system_f_ratio);
    let constraints = check_constraints(&geometry, &spec.constraints);
    log::debug!(
        "{kind} Fp {:.2} Fs {:.2}: tube {:.1} mm, obstruction {:.3}, wfe {:.3} waves",
        inputs.primary_f_ratio,
        inputs.system_f_ratio,
        geometry.tube_length_mm,
        geometry.obstruction_ratio,
        image_quality.wfe_rms_waves_edge
    );
    Candidate {
        kind,
        inputs,
        geometry,
        throughput,
        image_quality,
        constraints,
        score: None,
        plan: Some(plan),
        simulation: Some(simulation),
    }
}
