// ─────────────────────────────────────────────────────────────────────
// Reflector Design Core — Optical Plan
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Surfaces, materials and the traceable optical plan.
//!
//! Coordinates are millimetres with the primary vertex at the origin and the
//! optical axis along +z. Starlight enters travelling towards -z.

use crate::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// How a ray interacts with a surface it hits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    /// Specular bounce; reflectivity in (0, 1].
    Reflector { reflectivity: f64 },
    /// Pass-through with unchanged direction.
    Transmitter { transmission: f64 },
    /// Terminal surface.
    Absorber,
}

/// Circular clear aperture, optionally annular.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aperture {
    pub outer_radius: f64,
    #[serde(default)]
    pub inner_radius: f64,
}

impl Aperture {
    pub fn circular(outer_radius: f64) -> Self {
        Aperture {
            outer_radius: outer_radius.max(0.0),
            inner_radius: 0.0,
        }
    }

    pub fn annular(outer_radius: f64, inner_radius: f64) -> Self {
        Aperture {
            outer_radius: outer_radius.max(0.0),
            inner_radius: inner_radius.clamp(0.0, outer_radius.max(0.0)),
        }
    }
}

/// Which side of `z0` the conic bulges towards as r grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SagSign {
    Positive,
    Negative,
}

impl SagSign {
    pub fn value(self) -> f64 {
        match self {
            SagSign::Positive => 1.0,
            SagSign::Negative => -1.0,
        }
    }
}

/// Rotationally symmetric conic about the z axis: z = z0 + sign · s(r).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConicSurface {
    pub label: String,
    /// Vertex position along the optical axis [mm].
    pub z0: f64,
    /// Vertex radius of curvature, unsigned [mm].
    pub radius: f64,
    /// Conic constant K (0 sphere, -1 paraboloid, < -1 hyperboloid).
    pub conic: f64,
    pub sag_sign: SagSign,
    pub aperture: Aperture,
    pub material: Material,
}

/// Flat surface through `point` with unit `normal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneSurface {
    pub label: String,
    pub point: Vec3,
    pub normal: Vec3,
    pub aperture: Aperture,
    pub material: Material,
}

impl PlaneSurface {
    /// Same plane shifted by `offset` along its normal.
    pub fn shifted(&self, offset: f64) -> PlaneSurface {
        PlaneSurface {
            point: self.point + self.normal * offset,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Surface {
    Conic(ConicSurface),
    Plane(PlaneSurface),
}

impl Surface {
    pub fn label(&self) -> &str {
        match self {
            Surface::Conic(c) => &c.label,
            Surface::Plane(p) => &p.label,
        }
    }

    pub fn material(&self) -> Material {
        match self {
            Surface::Conic(c) => c.material,
            Surface::Plane(p) => p.material,
        }
    }

    pub fn aperture(&self) -> Aperture {
        match self {
            Surface::Conic(c) => c.aperture,
            Surface::Plane(p) => p.aperture,
        }
    }
}

/// Ray launch description: a collimated bundle per field angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntranceSpec {
    /// z of the launch plane [mm]; must lie in front of every surface.
    pub launch_z: f64,
    /// Entrance pupil radius, centred on the primary vertex plane [mm].
    pub pupil_radius: f64,
    /// Pupil points inside this radius are shadowed and never launched [mm].
    #[serde(default)]
    pub obstruction_radius: f64,
    /// Field angles in the tangential (y-z) plane [rad].
    pub field_angles: Vec<f64>,
}

/// Terminal absorbing detector plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    pub plane: PlaneSurface,
}

impl SensorSpec {
    pub fn new(point: Vec3, normal: Vec3, radius: f64) -> Self {
        SensorSpec {
            plane: PlaneSurface {
                label: "sensor".into(),
                point,
                normal,
                aperture: Aperture::circular(radius),
                material: Material::Absorber,
            },
        }
    }

    /// Nominal image distance used to scale the focus search step [mm].
    pub fn nominal_distance(&self) -> f64 {
        self.plane.point.dot(self.plane.normal).abs()
    }
}

/// Ordered non-sensor surfaces plus entrance and sensor. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalPlan {
    pub surfaces: Vec<Surface>,
    pub entrance: EntranceSpec,
    pub sensor: SensorSpec,
    /// Reflections of an imaging path. Sensor hits reached after any other
    /// count are stray light and stay out of the spot. `None` accepts all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominal_reflections: Option<usize>,
}

impl OpticalPlan {
    /// Whether a path that met `reflections` mirrors belongs to the image.
    pub fn is_imaging_path(&self, reflections: usize) -> bool {
        self.nominal_reflections.is_none_or(|n| n == reflections)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PupilSampling {
    /// Grid cells per pupil diameter.
    #[serde(default = "default_pupil_steps")]
    pub steps: usize,
}

impl Default for PupilSampling {
    fn default() -> Self {
        PupilSampling {
            steps: default_pupil_steps(),
        }
    }
}

/// Ray sampling configuration, reused across a whole sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSpec {
    #[serde(default)]
    pub pupil: PupilSampling,
    /// Rays traced per focus-search plane (0 = whole bundle).
    #[serde(default = "default_rays_per_field")]
    pub rays_per_field: usize,
    #[serde(default = "default_max_bounces")]
    pub max_bounces: usize,
}

fn default_pupil_steps() -> usize {
    11
}
fn default_rays_per_field() -> usize {
    48
}
fn default_max_bounces() -> usize {
    8
}

impl Default for SampleSpec {
    fn default() -> Self {
        SampleSpec {
            pupil: PupilSampling::default(),
            rays_per_field: default_rays_per_field(),
            max_bounces: default_max_bounces(),
        }
    }
}
