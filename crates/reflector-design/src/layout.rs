// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Two-Mirror Layout
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! First-order layout shared by the folded families.
//!
//! With magnification m = Fs/Fp, primary focal length f₁ = Fp·D and a fixed
//! backfocus b behind the primary vertex:
//!
//! d = (m·f₁ − b)/(m + 1)
//!
//! The secondary sees the primary focus p = f₁ − d behind it and images it
//! q = d + b in front, so its vertex radius is |R₂| = 2pq/(q − p).

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

/// Primary perforation radius as a fraction of the obstruction shadow.
const PRIMARY_HOLE_FRACTION: f64 = 0.9;
/// Launch plane height above the secondary, in apertures.
const LAUNCH_CLEARANCE: f64 = 0.1;
/// Corrector plate height above the secondary, in apertures.
const CORRECTOR_CLEARANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoMirrorLayout {
    pub aperture_mm: f64,
    pub primary_focal_mm: f64,
    pub system_focal_mm: f64,
    pub magnification: f64,
    /// Primary-to-secondary vertex spacing d [mm].
    pub spacing_mm: f64,
    pub backfocus_mm: f64,
    /// Marginal cone radius at the secondary [mm].
    pub cone_radius_mm: f64,
    /// Edge-field chief ray height at the secondary [mm].
    pub chief_height_mm: f64,
    pub secondary_diameter_mm: f64,
    pub field_angle: f64,
}

impl TwoMirrorLayout {
    /// Solve the layout, or `None` when the trial cannot be folded.
    pub fn solve(
        aperture_mm: f64,
        trial: FRatioTrial,
        backfocus_mm: f64,
        field_radius_mm: f64,
    ) -> Option<Self> {
        let fp = trial.primary_f_ratio;
        let fs = trial.system_f_ratio;
        let inputs_ok = [aperture_mm, fp, fs, backfocus_mm, field_radius_mm]
            .iter()
            .all(|v| v.is_finite());
        if !inputs_ok || aperture_mm <= 0.0 || fp <= 0.0 || fs <= fp {
            return None;
        }
        if backfocus_mm < 0.0 || field_radius_mm < 0.0 {
            return None;
        }

        let magnification = fs / fp;
        let primary_focal_mm = fp * aperture_mm;
        let system_focal_mm = fs * aperture_mm;
        let spacing_mm = (magnification * primary_focal_mm - backfocus_mm) / (magnification + 1.0);
        if spacing_mm <= 0.0 || spacing_mm >= primary_focal_mm {
            return None;
        }

        let field_angle = edge_field_angle(field_radius_mm, system_focal_mm);
        let cone_radius_mm = 0.5 * aperture_mm * (1.0 - spacing_mm / primary_focal_mm);
        let chief_height_mm = spacing_mm * field_angle.tan();
        let secondary_diameter_mm = 2.0 * (cone_radius_mm + chief_height_mm);
        if !secondary_diameter_mm.is_finite() || secondary_diameter_mm <= 0.0 {
            return None;
        }

        Some(TwoMirrorLayout {
            aperture_mm,
            primary_focal_mm,
            system_focal_mm,
            magnification,
            spacing_mm,
            backfocus_mm,
            cone_radius_mm,
            chief_height_mm,
            secondary_diameter_mm,
            field_angle,
        })
    }

    /// Layout for `trial` at the input's design backfocus and field.
    pub fn from_spec(spec: &InputSpec, trial: FRatioTrial) -> Option<Self> {
        Self::solve(
            spec.aperture_mm(),
            trial,
            spec.design_backfocus_mm(),
            spec.field_radius_mm(),
        )
    }

    /// Vertex radius of curvature of the convex secondary [mm].
    pub fn secondary_radius_mm(&self) -> f64 {
        let p = self.primary_focal_mm - self.spacing_mm;
        let q = self.spacing_mm + self.backfocus_mm;
        2.0 * p * q / (q - p)
    }

    /// Backfocus as a fraction of the primary focal length.
    pub fn backfocus_ratio(&self) -> f64 {
        self.backfocus_mm / self.primary_focal_mm
    }
}

/// Paraboloid primary with the hyperboloid secondary that reimages its focus.
pub fn classical_conics(magnification: f64) -> (f64, f64) {
    let m = magnification;
    (-1.0, -((m + 1.0) / (m - 1.0)).powi(2))
}

/// Family-specific choices layered on the shared layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilyParams {
    pub kind: DesignKind,
    /// Obstruction diameter over geometric secondary diameter.
    pub baffle_factor: f64,
    pub primary_conic: f64,
    pub secondary_conic: f64,
    /// Transmission of a front corrector plate, if the family has one.
    pub corrector_transmission: Option<f64>,
}

/// Build, trace and check a folded two-mirror candidate.
pub fn build_two_mirror(
    spec: &InputSpec,
    trial: FRatioTrial,
    layout: &TwoMirrorLayout,
    family: FamilyParams,
) -> Candidate {
    let aperture = layout.aperture_mm;
    let obstruction_diameter_mm = family.baffle_factor * layout.secondary_diameter_mm;
    let obstruction_ratio = obstruction_diameter_mm / aperture;
    let obstruction_radius = 0.5 * obstruction_diameter_mm;
    let reflectivity = spec.optics.mirror_reflectivity;

    let mut surfaces = Vec::with_capacity(3);
    if let Some(transmission) = family.corrector_transmission {
        surfaces.push(Surface::Plane(PlaneSurface {
            label: "corrector".into(),
            point: Vec3::new(0.0, 0.0, layout.spacing_mm + CORRECTOR_CLEARANCE * aperture),
            normal: Vec3::Z,
            aperture: Aperture::circular(0.5 * aperture),
            material: Material::Transmitter { transmission },
        }));
    }
    surfaces.push(Surface::Conic(ConicSurface {
        label: "primary".into(),
        z0: 0.0,
        radius: 2.0 * layout.primary_focal_mm,
        conic: family.primary_conic,
        sag_sign: SagSign::Positive,
        aperture: Aperture::annular(0.5 * aperture, PRIMARY_HOLE_FRACTION * obstruction_radius),
        material: Material::Reflector { reflectivity },
    }));
    surfaces.push(Surface::Conic(ConicSurface {
        label: "secondary".into(),
        z0: layout.spacing_mm,
        radius: layout.secondary_radius_mm(),
        conic: family.secondary_conic,
        sag_sign: SagSign::Positive,
        aperture: Aperture::circular(0.5 * layout.secondary_diameter_mm),
        material: Material::Reflector { reflectivity },
    }));

    let field_radius = spec.field_radius_mm();
    let plan = OpticalPlan {
        surfaces,
        entrance: EntranceSpec {
            launch_z: layout.spacing_mm + LAUNCH_CLEARANCE * aperture,
            pupil_radius: 0.5 * aperture,
            obstruction_radius,
            field_angles: field_angles(layout.field_angle),
        },
        sensor: SensorSpec::new(
            Vec3::new(0.0, 0.0, -layout.backfocus_mm),
            Vec3::Z,
            sensor_radius(field_radius, aperture),
        ),
        nominal_reflections: Some(2),
    };

    let inputs = CandidateInputs {
        aperture_mm: aperture,
        primary_f_ratio: trial.primary_f_ratio,
        system_f_ratio: trial.system_f_ratio,
        primary_focal_length_mm: layout.primary_focal_mm,
        system_focal_length_mm: layout.system_focal_mm,
    };
    let geometry = GeometryMetrics {
        tube_length_mm: layout.spacing_mm + spec.tube_margin_mm(),
        backfocus_mm: layout.backfocus_mm,
        mirror_spacing_mm: layout.spacing_mm,
        secondary_diameter_mm: layout.secondary_diameter_mm,
        obstruction_diameter_mm,
        obstruction_ratio,
    };
    let throughput = throughput_metrics(
        aperture,
        obstruction_ratio,
        reflectivity,
        2,
        family.corrector_transmission.unwrap_or(1.0),
    );

    assemble(family.kind, spec, inputs, geometry, throughput, plan)
}
